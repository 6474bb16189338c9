use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            username: username.into(),
            is_admin,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    InvalidSecret,
}

fn secret() -> Result<&'static str, JwtError> {
    let secret = config::config().security.jwt_secret.as_str();
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }
    Ok(secret)
}

/// Sign claims with the configured secret (HS256)
pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    let encoding_key = EncodingKey::from_secret(secret()?.as_bytes());

    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Convenience for tooling and tests
pub fn create_token(username: &str, is_admin: bool) -> Result<String, JwtError> {
    generate_jwt(&Claims::new(username, is_admin))
}

/// Verify signature and expiry, returning the claims
pub fn validate_jwt(token: &str) -> Result<Claims, JwtError> {
    let decoding_key = DecodingKey::from_secret(secret()?.as_bytes());

    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_claims() {
        let token = create_token("admin", true).unwrap();
        let claims = validate_jwt(&token).unwrap();
        assert_eq!(claims.username, "admin");
        assert!(claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_tampered_token() {
        let token = create_token("u1", false).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[2] = "c2lnbmF0dXJl";
        assert!(matches!(validate_jwt(&parts.join(".")), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let claims = Claims::new("u1", true);
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"not-the-secret")).unwrap();
        assert!(validate_jwt(&token).is_err());
    }

    #[test]
    fn claims_use_camel_case_admin_flag() {
        let value = serde_json::to_value(Claims::new("u1", false)).unwrap();
        assert_eq!(value["isAdmin"], false);
        assert_eq!(value["username"], "u1");
    }
}
