pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use models::{Journal, Monthly, User};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The `(user_id, date)` uniqueness constraint rejected a write. This
    /// is the authoritative guard; the service-level duplicate scan is a
    /// fast path only.
    #[error("duplicate journal date for owner")]
    DuplicateDate,
    #[error("duplicate username")]
    DuplicateUsername,
    #[error("database error: {0}")]
    Database(String),
}

/// Storage operations the service layer needs: point lookups by id,
/// lookups by owner, insert, update, delete. Ownership lists are not
/// stored anywhere; "journals owned by X" is always derived from the
/// owner index, so there is no dual write to keep consistent.
#[async_trait]
pub trait Store: Send + Sync {
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn users(&self) -> Result<Vec<User>, StoreError>;
    async fn insert_user(&self, user: User) -> Result<User, StoreError>;

    async fn journal_by_id(&self, id: Uuid) -> Result<Option<Journal>, StoreError>;
    /// Journals owned by one user, date-ascending.
    async fn journals_by_owner(&self, owner: Uuid) -> Result<Vec<Journal>, StoreError>;
    /// Any journal for `(owner, date)` other than `excluding`, if one exists.
    async fn journal_by_owner_and_date(
        &self,
        owner: Uuid,
        date: NaiveDate,
        excluding: Option<Uuid>,
    ) -> Result<Option<Journal>, StoreError>;
    async fn insert_journal(&self, journal: Journal) -> Result<Journal, StoreError>;
    async fn update_journal(&self, journal: Journal) -> Result<Journal, StoreError>;
    /// Returns false when no row existed to delete.
    async fn delete_journal(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn monthly_by_id(&self, id: Uuid) -> Result<Option<Monthly>, StoreError>;
    async fn monthlies_by_owner(&self, owner: Uuid) -> Result<Vec<Monthly>, StoreError>;
    async fn insert_monthly(&self, monthly: Monthly) -> Result<Monthly, StoreError>;
    async fn update_monthly(&self, monthly: Monthly) -> Result<Monthly, StoreError>;
    async fn delete_monthly(&self, id: Uuid) -> Result<bool, StoreError>;
}
