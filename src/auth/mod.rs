use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::User;

/// Claims carried by a signed bearer token. `user_id` is the subject
/// identifier the resolver looks up; a token without it fails to decode.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token missing or invalid")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid username or password")]
    BadCredentials,
    #[error("JWT secret not configured")]
    MissingSecret,
}

/// Signs and verifies bearer tokens. Built once at startup from the
/// security configuration and shared through application state.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: i64,
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Result<Self, AuthError> {
        if security.jwt_secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(security.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(security.jwt_secret.as_bytes()),
            expiry_hours: security.jwt_expiry_hours as i64,
        })
    }

    /// Issue a signed, expiring token for a user.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user.id,
            username: user.username.clone(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::InvalidToken)
    }

    /// Verify a raw token string. Bad signature, expiry and a missing
    /// subject claim all collapse to `InvalidToken`; a missing token is the
    /// caller's condition, never seen here.
    pub fn decode(&self, raw: &str) -> Result<Claims, AuthError> {
        let validation = Validation::default();
        decode::<Claims>(raw, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("token rejected: {}", e);
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;

    fn security(secret: &str) -> SecurityConfig {
        SecurityConfig { jwt_secret: secret.to_string(), jwt_expiry_hours: 1 }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            name: "Test User".to_string(),
            password_hash: String::new(),
        }
    }

    #[test]
    fn round_trip_preserves_subject() {
        let codec = TokenCodec::new(&security("s3cret")).unwrap();
        let user = test_user();
        let token = codec.issue(&user).unwrap();
        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.username, "tester");
    }

    #[test]
    fn garbage_token_is_invalid() {
        let codec = TokenCodec::new(&security("s3cret")).unwrap();
        assert!(matches!(codec.decode("not.a.token"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let signer = TokenCodec::new(&security("one")).unwrap();
        let verifier = TokenCodec::new(&security("two")).unwrap();
        let token = signer.issue(&test_user()).unwrap();
        assert!(matches!(verifier.decode(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_invalid() {
        let security = SecurityConfig { jwt_secret: "s3cret".to_string(), jwt_expiry_hours: 0 };
        let codec = TokenCodec::new(&security).unwrap();
        // expiry_hours = 0 puts exp at "now"; default validation leeway is
        // 60s, so back-date the claims manually instead.
        let now = Utc::now();
        let claims = Claims {
            user_id: Uuid::new_v4(),
            username: "tester".to_string(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("s3cret".as_bytes()),
        )
        .unwrap();
        assert!(matches!(codec.decode(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn empty_secret_is_rejected_at_construction() {
        assert!(matches!(TokenCodec::new(&security("")), Err(AuthError::MissingSecret)));
    }
}
