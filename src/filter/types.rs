use sqlx::types::BigDecimal;

/// A typed positional parameter. Nulls keep their SQL type so Postgres can
/// assign them to the target column.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(Option<String>),
    Int(Option<i32>),
    Decimal(Option<BigDecimal>),
}

impl SqlParam {
    pub fn text(value: impl Into<String>) -> Self {
        SqlParam::Text(Some(value.into()))
    }

    pub fn int(value: i32) -> Self {
        SqlParam::Int(Some(value))
    }

    pub fn is_null(&self) -> bool {
        match self {
            SqlParam::Text(v) => v.is_none(),
            SqlParam::Int(v) => v.is_none(),
            SqlParam::Decimal(v) => v.is_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Case-insensitive substring match
    Contains,
    Eq,
    Gte,
    Lte,
    /// Column strictly greater than zero; binds nothing
    Positive,
}

#[derive(Debug, Clone)]
pub struct FilterWhereInfo {
    pub column: &'static str,
    pub operator: FilterOp,
    pub data: Option<SqlParam>,
}

/// Final statement text plus its parameters in `$n` order.
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}

impl SqlResult {
    pub fn new(query: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self { query: query.into(), params }
    }
}
