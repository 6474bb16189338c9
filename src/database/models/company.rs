use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::job::Job;
use crate::filter::{FieldValues, SqlParam};
use crate::validation::{lowercase_handle, nullable};

/// Column list shared by every company query
pub const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Logical (JSON) field name -> physical column
pub const COMPANY_FIELD_COLUMNS: &[(&str, &str)] = &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company with the jobs it has posted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

/// Body of `POST /companies`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct NewCompany {
    #[validate(length(min = 1, max = 25), custom(function = "lowercase_handle"))]
    pub handle: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0))]
    pub num_employees: Option<i32>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Body of `PATCH /companies/:handle`; `handle` is rejected before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CompanyUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 0))]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(url)]
    pub logo_url: Option<Option<String>>,
}

impl CompanyUpdate {
    pub const IMMUTABLE: &'static [&'static str] = &["handle"];

    /// Supplied fields under their JSON names, for `sql_for_partial_update`
    pub fn into_values(self) -> FieldValues {
        let mut values = Vec::new();
        if let Some(name) = self.name {
            values.push(("name".to_string(), SqlParam::Text(Some(name))));
        }
        if let Some(description) = self.description {
            values.push(("description".to_string(), SqlParam::Text(Some(description))));
        }
        if let Some(num_employees) = self.num_employees {
            values.push(("numEmployees".to_string(), SqlParam::Int(num_employees)));
        }
        if let Some(logo_url) = self.logo_url {
            values.push(("logoUrl".to_string(), SqlParam::Text(logo_url)));
        }
        values
    }
}
