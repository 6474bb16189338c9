use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use sqlx::FromRow;
use validator::Validate;

use crate::filter::{FieldValues, SqlParam};
use crate::validation::{equity, nullable, nullable_equity};

/// Column list shared by every job query. NUMERIC is read back in Postgres's
/// own text form so `0.05` stays `"0.05"`.
pub const JOB_COLUMNS: &str = "id, title, salary, equity::text AS equity, company_handle";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
}

/// Body of `POST /jobs`
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewJob {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0))]
    pub salary: Option<i32>,
    #[serde(default, deserialize_with = "equity")]
    pub equity: Option<BigDecimal>,
    #[validate(length(min = 1, max = 25))]
    pub company_handle: String,
}

/// Body of `PATCH /jobs/:id`; `id` is rejected before parsing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct JobUpdate {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 0))]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable_equity")]
    pub equity: Option<Option<BigDecimal>>,
    #[validate(length(min = 1, max = 25))]
    pub company_handle: Option<String>,
}

impl JobUpdate {
    pub const IMMUTABLE: &'static [&'static str] = &["id"];

    pub fn into_values(self) -> FieldValues {
        let mut values = Vec::new();
        if let Some(title) = self.title {
            values.push(("title".to_string(), SqlParam::Text(Some(title))));
        }
        if let Some(salary) = self.salary {
            values.push(("salary".to_string(), SqlParam::Int(salary)));
        }
        if let Some(equity) = self.equity {
            values.push(("equity".to_string(), SqlParam::Decimal(equity)));
        }
        if let Some(company_handle) = self.company_handle {
            values.push(("company_handle".to_string(), SqlParam::Text(Some(company_handle))));
        }
        values
    }
}
