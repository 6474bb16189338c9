use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::auth::{validate_jwt, Claims};
use crate::middleware::access::Access;

/// Who is calling, as established from the bearer token
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    User { username: String },
    Admin { username: String },
}

impl Caller {
    pub fn access(&self) -> Access {
        match self {
            Caller::Anonymous => Access::Anonymous,
            Caller::User { .. } => Access::User,
            Caller::Admin { .. } => Access::Admin,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Caller::Anonymous => None,
            Caller::User { username } | Caller::Admin { username } => Some(username.as_str()),
        }
    }
}

impl From<Claims> for Caller {
    fn from(claims: Claims) -> Self {
        if claims.is_admin {
            Caller::Admin { username: claims.username }
        } else {
            Caller::User { username: claims.username }
        }
    }
}

/// Attach a `Caller` to every request.
///
/// A missing or invalid token is not an error here; the request continues as
/// anonymous and `require_access` decides whether that is enough.
pub async fn authenticate_jwt(mut request: Request, next: Next) -> Response {
    let caller = match extract_jwt_from_headers(request.headers()) {
        Ok(Some(token)) => match validate_jwt(&token) {
            Ok(claims) => Caller::from(claims),
            Err(e) => {
                tracing::debug!("Ignoring bearer token: {}", e);
                Caller::Anonymous
            }
        },
        Ok(None) => Caller::Anonymous,
        Err(msg) => {
            tracing::debug!("Ignoring authorization header: {}", msg);
            Caller::Anonymous
        }
    };

    request.extensions_mut().insert(caller);
    next.run(request).await
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        let token = token.trim();
        if token.is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(Some(token.to_string()))
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_header_is_anonymous() {
        assert_eq!(extract_jwt_from_headers(&HeaderMap::new()), Ok(None));
    }

    #[test]
    fn bearer_prefix_required() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Token abc"));
        assert!(extract_jwt_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_jwt_from_headers(&headers), Ok(Some("abc".to_string())));
    }

    #[test]
    fn claims_map_to_caller() {
        let admin = Caller::from(Claims::new("boss", true));
        assert_eq!(admin.access(), Access::Admin);
        assert_eq!(admin.username(), Some("boss"));

        let user = Caller::from(Claims::new("u1", false));
        assert_eq!(user.access(), Access::User);
        assert_eq!(Caller::default().access(), Access::Anonymous);
    }
}
