use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Journal, Monthly, User};
use super::{Store, StoreError};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    journals: HashMap<Uuid, Journal>,
    monthlies: HashMap<Uuid, Monthly>,
}

/// In-memory store used when no DATABASE_URL is configured, and by the
/// test suite. The uniqueness constraints are enforced under the write
/// lock, so the check and the insert are a single atomic step here just
/// as the unique index makes them in Postgres.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn users(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername);
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn journal_by_id(&self, id: Uuid) -> Result<Option<Journal>, StoreError> {
        Ok(self.inner.read().await.journals.get(&id).cloned())
    }

    async fn journals_by_owner(&self, owner: Uuid) -> Result<Vec<Journal>, StoreError> {
        let inner = self.inner.read().await;
        let mut journals: Vec<Journal> =
            inner.journals.values().filter(|j| j.user_id == owner).cloned().collect();
        journals.sort_by_key(|j| j.date);
        Ok(journals)
    }

    async fn journal_by_owner_and_date(
        &self,
        owner: Uuid,
        date: NaiveDate,
        excluding: Option<Uuid>,
    ) -> Result<Option<Journal>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .journals
            .values()
            .find(|j| j.user_id == owner && j.date == date && Some(j.id) != excluding)
            .cloned())
    }

    async fn insert_journal(&self, journal: Journal) -> Result<Journal, StoreError> {
        let mut inner = self.inner.write().await;
        let conflict = inner
            .journals
            .values()
            .any(|j| j.user_id == journal.user_id && j.date == journal.date);
        if conflict {
            return Err(StoreError::DuplicateDate);
        }
        inner.journals.insert(journal.id, journal.clone());
        Ok(journal)
    }

    async fn update_journal(&self, journal: Journal) -> Result<Journal, StoreError> {
        let mut inner = self.inner.write().await;
        let conflict = inner
            .journals
            .values()
            .any(|j| j.user_id == journal.user_id && j.date == journal.date && j.id != journal.id);
        if conflict {
            return Err(StoreError::DuplicateDate);
        }
        if !inner.journals.contains_key(&journal.id) {
            return Err(StoreError::Database(format!("journal {} does not exist", journal.id)));
        }
        inner.journals.insert(journal.id, journal.clone());
        Ok(journal)
    }

    async fn delete_journal(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.journals.remove(&id).is_some())
    }

    async fn monthly_by_id(&self, id: Uuid) -> Result<Option<Monthly>, StoreError> {
        Ok(self.inner.read().await.monthlies.get(&id).cloned())
    }

    async fn monthlies_by_owner(&self, owner: Uuid) -> Result<Vec<Monthly>, StoreError> {
        let inner = self.inner.read().await;
        let mut monthlies: Vec<Monthly> =
            inner.monthlies.values().filter(|m| m.user_id == owner).cloned().collect();
        monthlies.sort_by_key(|m| m.date);
        Ok(monthlies)
    }

    async fn insert_monthly(&self, monthly: Monthly) -> Result<Monthly, StoreError> {
        let mut inner = self.inner.write().await;
        inner.monthlies.insert(monthly.id, monthly.clone());
        Ok(monthly)
    }

    async fn update_monthly(&self, monthly: Monthly) -> Result<Monthly, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.monthlies.contains_key(&monthly.id) {
            return Err(StoreError::Database(format!("monthly {} does not exist", monthly.id)));
        }
        inner.monthlies.insert(monthly.id, monthly.clone());
        Ok(monthly)
    }

    async fn delete_monthly(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.monthlies.remove(&id).is_some())
    }
}
