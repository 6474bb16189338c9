use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Successful response body, optionally wrapped under a single key
/// (`{"company": {...}}`).
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub key: Option<&'static str>,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Bare body with default 200 status
    pub fn success(data: T) -> Self {
        Self {
            data,
            key: None,
            status_code: None,
        }
    }

    /// `{key: data}` with default 200 status
    pub fn keyed(key: &'static str, data: T) -> Self {
        Self {
            data,
            key: Some(key),
            status_code: None,
        }
    }

    /// `{key: data}` with 201 Created
    pub fn created(key: &'static str, data: T) -> Self {
        Self {
            data,
            key: Some(key),
            status_code: Some(StatusCode::CREATED),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return crate::error::ApiError::internal_server_error("Failed to serialize response data")
                    .into_response();
            }
        };

        let body = match self.key {
            Some(key) => {
                let mut envelope = Map::new();
                envelope.insert(key.to_string(), data_value);
                Value::Object(envelope)
            }
            None => data_value,
        };

        (status, Json(body)).into_response()
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyed_wraps_data() {
        let response = ApiResponse::created("newJob", json!({"id": 1})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn default_status_is_ok() {
        let response = ApiResponse::success(json!({"handle": "c1"})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
