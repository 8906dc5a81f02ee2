use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Monthly, MonthlyDraft, User};
use crate::database::{Store, StoreError};

use super::journal_service::Action;

#[derive(Debug, Error)]
pub enum MonthlyError {
    #[error("date is required")]
    MissingDate,
    #[error("malformatted date")]
    MalformedDate,
    #[error("content is required")]
    MissingContent,
    #[error("cannot {0} a monthly created by other user")]
    ForeignOwner(Action),
    #[error("monthly not found")]
    NotFound,
    #[error("resource not found")]
    Vanished,
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn validate(draft: MonthlyDraft) -> Result<(NaiveDate, String), MonthlyError> {
    let raw_date = draft.date.ok_or(MonthlyError::MissingDate)?;
    let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
        .map_err(|_| MonthlyError::MalformedDate)?;
    let content = draft.content.filter(|c| !c.is_empty()).ok_or(MonthlyError::MissingContent)?;
    Ok((date, content))
}

/// Monthly summaries follow the journal ownership rules but carry no
/// per-date uniqueness invariant.
pub struct MonthlyService<'a> {
    store: &'a dyn Store,
}

impl<'a> MonthlyService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner: &User) -> Result<Vec<Monthly>, MonthlyError> {
        Ok(self.store.monthlies_by_owner(owner.id).await?)
    }

    pub async fn get(&self, owner: &User, id: Uuid) -> Result<Monthly, MonthlyError> {
        match self.store.monthly_by_id(id).await? {
            Some(monthly) if monthly.user_id == owner.id => Ok(monthly),
            _ => Err(MonthlyError::NotFound),
        }
    }

    pub async fn create(&self, owner: &User, draft: MonthlyDraft) -> Result<Monthly, MonthlyError> {
        let (date, content) = validate(draft)?;
        let monthly = Monthly { id: Uuid::new_v4(), date, content, user_id: owner.id };
        Ok(self.store.insert_monthly(monthly).await?)
    }

    pub async fn update(
        &self,
        owner: &User,
        id: Uuid,
        draft: MonthlyDraft,
    ) -> Result<Monthly, MonthlyError> {
        let current = self.store.monthly_by_id(id).await?.ok_or(MonthlyError::Vanished)?;
        if current.user_id != owner.id {
            return Err(MonthlyError::ForeignOwner(Action::Update));
        }
        let (date, content) = validate(draft)?;
        let updated = Monthly { id: current.id, date, content, user_id: current.user_id };
        Ok(self.store.update_monthly(updated).await?)
    }

    pub async fn delete(&self, owner: &User, id: Uuid) -> Result<(), MonthlyError> {
        let current = self.store.monthly_by_id(id).await?.ok_or(MonthlyError::Vanished)?;
        if current.user_id != owner.id {
            return Err(MonthlyError::ForeignOwner(Action::Delete));
        }
        if !self.store.delete_monthly(id).await? {
            return Err(MonthlyError::Vanished);
        }
        Ok(())
    }
}
