use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Journal, JournalDraft, User};
use crate::database::{Store, StoreError};

/// Which mutation produced a failure; only used to pick the contract
/// wording ("cannot post/update/delete ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Post,
    Update,
    Delete,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Action::Post => "post",
            Action::Update => "update",
            Action::Delete => "delete",
        })
    }
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal has no content")]
    EmptyContent,
    #[error("cannot {0} a journal with a duplicated date")]
    DuplicateDate(Action),
    #[error("cannot {0} a journal created by other user")]
    ForeignOwner(Action),
    #[error("date is required")]
    MissingDate,
    #[error("malformatted date")]
    MalformedDate,
    #[error("journal not found")]
    NotFound,
    /// The target record disappeared between request start and mutation.
    #[error("resource not found")]
    Vanished,
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, JournalError> {
    let raw = raw.ok_or(JournalError::MissingDate)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| JournalError::MalformedDate)
}

/// Journal operations for one authenticated owner. Enforces the content
/// and per-owner-date invariants and the ownership rules; reads mask
/// foreign records as not-found while mutations call the mismatch out.
pub struct JournalService<'a> {
    store: &'a dyn Store,
}

impl<'a> JournalService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner: &User) -> Result<Vec<Journal>, JournalError> {
        Ok(self.store.journals_by_owner(owner.id).await?)
    }

    /// Foreign-owned journals are indistinguishable from absent ones here.
    pub async fn get(&self, owner: &User, id: Uuid) -> Result<Journal, JournalError> {
        match self.store.journal_by_id(id).await? {
            Some(journal) if journal.user_id == owner.id => Ok(journal),
            _ => Err(JournalError::NotFound),
        }
    }

    pub async fn create(&self, owner: &User, draft: JournalDraft) -> Result<Journal, JournalError> {
        // Content check precedes date validation: a dateless empty draft
        // is a 409, not a 400.
        if draft.is_empty() {
            return Err(JournalError::EmptyContent);
        }
        let date = parse_date(draft.date.as_deref())?;

        // Fast path; the store constraint remains the authoritative guard
        // against concurrent creates passing this scan together.
        if self.store.journal_by_owner_and_date(owner.id, date, None).await?.is_some() {
            return Err(JournalError::DuplicateDate(Action::Post));
        }

        let journal = Journal {
            id: Uuid::new_v4(),
            date,
            todos: draft.todos,
            reflections: draft.reflections,
            book_summaries: draft.book_summaries,
            quotes: draft.quotes,
            words_of_today: draft.words_of_today,
            user_id: owner.id,
        };

        self.store.insert_journal(journal).await.map_err(|e| match e {
            StoreError::DuplicateDate => JournalError::DuplicateDate(Action::Post),
            other => other.into(),
        })
    }

    pub async fn update(
        &self,
        owner: &User,
        id: Uuid,
        draft: JournalDraft,
    ) -> Result<Journal, JournalError> {
        if draft.is_empty() {
            return Err(JournalError::EmptyContent);
        }

        let current = self.store.journal_by_id(id).await?.ok_or(JournalError::Vanished)?;
        if current.user_id != owner.id {
            return Err(JournalError::ForeignOwner(Action::Update));
        }

        let date = parse_date(draft.date.as_deref())?;

        // Re-saving with an unchanged date must not conflict with itself.
        if self.store.journal_by_owner_and_date(owner.id, date, Some(id)).await?.is_some() {
            return Err(JournalError::DuplicateDate(Action::Update));
        }

        // Id and owner come from the stored record, never from the draft.
        let updated = Journal {
            id: current.id,
            date,
            todos: draft.todos,
            reflections: draft.reflections,
            book_summaries: draft.book_summaries,
            quotes: draft.quotes,
            words_of_today: draft.words_of_today,
            user_id: current.user_id,
        };

        self.store.update_journal(updated).await.map_err(|e| match e {
            StoreError::DuplicateDate => JournalError::DuplicateDate(Action::Update),
            other => other.into(),
        })
    }

    pub async fn delete(&self, owner: &User, id: Uuid) -> Result<(), JournalError> {
        let current = self.store.journal_by_id(id).await?.ok_or(JournalError::Vanished)?;
        if current.user_id != owner.id {
            return Err(JournalError::ForeignOwner(Action::Delete));
        }
        if !self.store.delete_journal(id).await? {
            return Err(JournalError::Vanished);
        }
        Ok(())
    }
}
