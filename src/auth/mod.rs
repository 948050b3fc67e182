use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// Token payload issued to a principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, is_admin: bool, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            username: username.into(),
            is_admin,
            exp,
            iat: now.timestamp(),
        }
    }
}

/// Identity and role resolved from a verified token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

impl Principal {
    /// Admins may act on anyone; everyone else only on themselves.
    pub fn is_self_or_admin(&self, username: &str) -> bool {
        self.is_admin || self.username == username
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Issue a token for `username` using the configured secret and expiry.
pub fn create_token(username: &str, is_admin: bool, security: &SecurityConfig) -> Result<String, JwtError> {
    let claims = Claims::new(username, is_admin, security.jwt_expiry_hours);
    generate_jwt(&claims, &security.jwt_secret)
}

/// Validate JWT token and extract claims
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn round_trips_principal_through_token() {
        let token = generate_jwt(&Claims::new("u1", true, 1), SECRET).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();

        assert_eq!(
            Principal::from(claims),
            Principal {
                username: "u1".to_string(),
                is_admin: true
            }
        );
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = generate_jwt(&Claims::new("u1", false, 1), "other").unwrap();
        assert!(matches!(verify_jwt(&token, SECRET), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let mut claims = Claims::new("u1", false, 1);
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;
        let token = generate_jwt(&claims, SECRET).unwrap();

        assert!(verify_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn missing_admin_flag_means_not_admin() {
        // Tokens minted elsewhere may omit the flag entirely
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "username": "u2",
            "exp": 0,
            "iat": 0
        }))
        .unwrap();
        assert!(!claims.is_admin);
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(
            generate_jwt(&Claims::new("u1", false, 1), ""),
            Err(JwtError::InvalidSecret)
        ));
        assert!(matches!(verify_jwt("abc", ""), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn self_or_admin_rule() {
        let admin = Principal { username: "boss".into(), is_admin: true };
        let user = Principal { username: "u1".into(), is_admin: false };

        assert!(admin.is_self_or_admin("u1"));
        assert!(user.is_self_or_admin("u1"));
        assert!(!user.is_self_or_admin("u2"));
    }
}
