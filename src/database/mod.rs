pub mod manager;
pub mod models;
pub mod query_builder;

pub use manager::{DatabaseError, DatabaseManager};
pub use query_builder::QueryBuilder;
pub use models::{Company, CompanyDetail, Job, NewCompany, NewJob};
