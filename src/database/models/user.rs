use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    /// Salted digest, `salt$hex`. Never serialized to the wire.
    #[serde(skip_serializing)]
    pub password_hash: String,
}
