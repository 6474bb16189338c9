pub mod error;
pub mod filter_where;
pub mod partial_update;
pub mod search;
pub mod types;

pub use error::FilterError;
pub use filter_where::FilterWhere;
pub use partial_update::{sql_for_partial_update, FieldValues, PartialUpdate};
pub use search::{CompanySearch, JobSearch};
pub use types::*;
