use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("No data")]
    NoData,

    #[error("minEmployees cannot be greater than maxEmployees")]
    InvalidRange,

    #[error("Invalid value for {name}: {value:?}")]
    InvalidParameter { name: String, value: String },
}
