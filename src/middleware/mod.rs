pub mod access;
pub mod auth;
pub mod response;

pub use access::{require_access, Access};
pub use auth::{authenticate_jwt, Caller};
pub use response::{ApiResponse, ApiResult};
