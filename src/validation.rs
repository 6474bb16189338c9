//! Request body parsing and validation.
//!
//! Bodies deserialize into typed input structs (`#[serde(deny_unknown_fields)]`)
//! and are then checked with their `validator` rules.

use std::collections::HashMap;
use std::str::FromStr;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use sqlx::types::BigDecimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ApiError;

/// Parse a JSON body into `T` and run its validation rules.
///
/// Keys listed in `immutable` are rejected before anything else.
pub fn parse_body<T>(body: Value, immutable: &[&str]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let obj = body
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;

    if let Some(field) = immutable.iter().find(|f| obj.contains_key(**f)) {
        return Err(ApiError::bad_request(format!("{} cannot be changed", field)));
    }

    let input: T = serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(e.to_string(), None))?;

    input.validate().map_err(into_api_error)?;
    Ok(input)
}

fn into_api_error(errors: ValidationErrors) -> ApiError {
    let field_errors: HashMap<String, String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .unwrap_or_default();
            (field.to_string(), message)
        })
        .collect();

    ApiError::validation_error("Request body failed validation", Some(field_errors))
}

/// Handles are lowercase, matching the `companies.handle` CHECK.
pub fn lowercase_handle(handle: &str) -> Result<(), ValidationError> {
    if handle.chars().any(|c| c.is_uppercase()) {
        let mut err = ValidationError::new("lowercase");
        err.message = Some("must be lowercase".into());
        return Err(err);
    }
    Ok(())
}

/// `Some(None)` for an explicit null, `None` (via `#[serde(default)]`) when absent.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Equity: a JSON number or numeric string in [0, 1].
pub fn equity<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)?
        .map(|value| parse_equity(&value).map_err(de::Error::custom))
        .transpose()
}

/// Same as [`equity`] for patch bodies.
pub fn nullable_equity<'de, D>(deserializer: D) -> Result<Option<Option<BigDecimal>>, D::Error>
where
    D: Deserializer<'de>,
{
    equity(deserializer).map(Some)
}

fn parse_equity(value: &Value) -> Result<BigDecimal, String> {
    let parsed = match value {
        Value::Number(n) => BigDecimal::from_str(&n.to_string()),
        Value::String(s) => BigDecimal::from_str(s.trim()),
        other => return Err(format!("equity must be a number or numeric string, got {}", other)),
    };
    let d = parsed.map_err(|_| "equity must be a decimal number".to_string())?;
    if d < BigDecimal::from(0i64) || d > BigDecimal::from(1i64) {
        return Err("equity must be between 0 and 1".to_string());
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(deny_unknown_fields)]
    struct Posting {
        #[validate(length(min = 1, max = 10))]
        title: String,
        #[validate(range(min = 0))]
        salary: Option<i32>,
        #[serde(default, deserialize_with = "equity")]
        equity: Option<BigDecimal>,
        #[serde(default, deserialize_with = "nullable")]
        note: Option<Option<String>>,
    }

    fn field_errors(err: ApiError) -> HashMap<String, String> {
        match err {
            ApiError::ValidationError { field_errors: Some(errors), .. } => errors,
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn parses_valid_body() {
        let posting: Posting =
            parse_body(json!({"title": "dev", "salary": 100, "equity": "0.05"}), &[]).unwrap();
        assert_eq!(posting.title, "dev");
        assert_eq!(posting.salary, Some(100));
        assert_eq!(posting.equity.unwrap().to_string(), "0.05");
        assert_eq!(posting.note, None);
    }

    #[test]
    fn null_is_distinct_from_absent() {
        let posting: Posting = parse_body(json!({"title": "dev", "note": null}), &[]).unwrap();
        assert_eq!(posting.note, Some(None));
    }

    #[test]
    fn rejects_immutable_field_first() {
        let err = parse_body::<Posting>(json!({"id": "1337", "title": "x"}), &["id"]).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "id cannot be changed"));
    }

    #[test]
    fn rejects_unknown_and_missing_fields() {
        let err = parse_body::<Posting>(json!({"title": "x", "color": "red"}), &[]).unwrap_err();
        assert!(err.message().contains("unknown field `color`"));

        let err = parse_body::<Posting>(json!({"salary": 1}), &[]).unwrap_err();
        assert!(err.message().contains("missing field `title`"));
    }

    #[test]
    fn reports_rule_failures_per_field() {
        let errors = field_errors(
            parse_body::<Posting>(json!({"title": "far too long title", "salary": -1}), &[]).unwrap_err(),
        );
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("salary"));
    }

    #[test]
    fn equity_outside_unit_range() {
        let err = parse_body::<Posting>(json!({"title": "x", "equity": 1.5}), &[]).unwrap_err();
        assert!(err.message().contains("equity must be between 0 and 1"));
    }

    #[test]
    fn handles_must_be_lowercase() {
        assert!(lowercase_handle("c1-new").is_ok());
        assert!(lowercase_handle("Upper").is_err());
    }

    #[test]
    fn non_object_body() {
        let err = parse_body::<Posting>(json!([1, 2]), &[]).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
