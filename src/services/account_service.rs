use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{AuthError, TokenCodec};
use crate::database::models::User;
use crate::database::{Store, StoreError};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username and name are required")]
    MissingField,
    #[error("username must be at least 3 characters long")]
    ShortUsername,
    #[error("password must be at least 3 characters long")]
    ShortPassword,
    #[error("username must be unique")]
    DuplicateUsername,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub name: String,
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn verify_password(stored: &str, password: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, digest)) => hash_password(salt, password) == digest,
        None => false,
    }
}

pub struct AccountService<'a> {
    store: &'a dyn Store,
}

impl<'a> AccountService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub async fn register(&self, new_user: NewUser) -> Result<User, AccountError> {
        let username = new_user.username.filter(|u| !u.is_empty()).ok_or(AccountError::MissingField)?;
        let name = new_user.name.filter(|n| !n.is_empty()).ok_or(AccountError::MissingField)?;
        let password = new_user.password.unwrap_or_default();

        if username.len() < 3 {
            return Err(AccountError::ShortUsername);
        }
        if password.len() < 3 {
            return Err(AccountError::ShortPassword);
        }

        let salt = Uuid::new_v4().simple().to_string();
        let user = User {
            id: Uuid::new_v4(),
            username,
            name,
            password_hash: format!("{}${}", salt, hash_password(&salt, &password)),
        };

        self.store.insert_user(user).await.map_err(|e| match e {
            StoreError::DuplicateUsername => AccountError::DuplicateUsername,
            other => other.into(),
        })
    }

    /// Wrong username and wrong password are indistinguishable to the caller.
    pub async fn login(
        &self,
        codec: &TokenCodec,
        credentials: Credentials,
    ) -> Result<Session, AuthError> {
        let user = self
            .store
            .user_by_username(&credentials.username)
            .await
            .map_err(|e| {
                tracing::error!("login lookup failed: {}", e);
                AuthError::BadCredentials
            })?
            .ok_or(AuthError::BadCredentials)?;

        if !verify_password(&user.password_hash, &credentials.password) {
            return Err(AuthError::BadCredentials);
        }

        let token = codec.issue(&user)?;
        Ok(Session { token, username: user.username, name: user.name })
    }

    pub async fn list(&self) -> Result<Vec<User>, AccountError> {
        Ok(self.store.users().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::database::memory::MemoryStore;

    fn codec() -> TokenCodec {
        let security =
            SecurityConfig { jwt_secret: "test-secret".to_string(), jwt_expiry_hours: 1 };
        TokenCodec::new(&security).unwrap()
    }

    fn new_user(username: &str, password: &str) -> NewUser {
        NewUser {
            username: Some(username.to_string()),
            name: Some("Some Name".to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn register_then_login_yields_a_decodable_token() {
        let store = MemoryStore::new();
        let service = AccountService::new(&store);
        let codec = codec();

        let user = service.register(new_user("alice", "sekret")).await.unwrap();
        let session = service
            .login(
                &codec,
                Credentials { username: "alice".to_string(), password: "sekret".to_string() },
            )
            .await
            .unwrap();
        assert_eq!(codec.decode(&session.token).unwrap().user_id, user.id);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let store = MemoryStore::new();
        let service = AccountService::new(&store);

        service.register(new_user("alice", "sekret")).await.unwrap();
        let result = service
            .login(
                &codec(),
                Credentials { username: "alice".to_string(), password: "wrong".to_string() },
            )
            .await;
        assert!(matches!(result, Err(AuthError::BadCredentials)));
    }

    #[tokio::test]
    async fn username_must_be_unique() {
        let store = MemoryStore::new();
        let service = AccountService::new(&store);

        service.register(new_user("alice", "sekret")).await.unwrap();
        let result = service.register(new_user("alice", "other")).await;
        assert!(matches!(result, Err(AccountError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn short_credentials_are_rejected() {
        let store = MemoryStore::new();
        let service = AccountService::new(&store);

        assert!(matches!(
            service.register(new_user("al", "sekret")).await,
            Err(AccountError::ShortUsername)
        ));
        assert!(matches!(
            service.register(new_user("alice", "pw")).await,
            Err(AccountError::ShortPassword)
        ));
    }

    #[tokio::test]
    async fn password_hash_never_serializes() {
        let store = MemoryStore::new();
        let service = AccountService::new(&store);
        let user = service.register(new_user("alice", "sekret")).await.unwrap();
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
    }
}
