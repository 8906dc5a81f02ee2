use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use uuid::Uuid;

use crate::config::DatabaseConfig;

use super::models::{BookSummary, Journal, Monthly, Quote, Reflection, Todo, User, WordOfToday};
use super::{Store, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS journals (
    id UUID PRIMARY KEY,
    date DATE NOT NULL,
    todos JSONB NOT NULL DEFAULT '[]',
    reflections JSONB NOT NULL DEFAULT '[]',
    book_summaries JSONB NOT NULL DEFAULT '[]',
    quotes JSONB NOT NULL DEFAULT '[]',
    words_of_today JSONB NOT NULL DEFAULT '[]',
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    CONSTRAINT journals_user_id_date_key UNIQUE (user_id, date)
);

CREATE TABLE IF NOT EXISTS monthlies (
    id UUID PRIMARY KEY,
    date DATE NOT NULL,
    content TEXT NOT NULL,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE
);
"#;

/// Postgres-backed store. The `journals_user_id_date_key` unique
/// constraint is the authoritative duplicate-date guard; violations are
/// translated to `StoreError::DuplicateDate` rather than surfacing as
/// generic database failures.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }

        Ok(Self { pool })
    }
}

fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23505") {
            return match db.constraint() {
                Some(name) if name.contains("username") => StoreError::DuplicateUsername,
                _ => StoreError::DuplicateDate,
            };
        }
    }
    StoreError::Database(e.to_string())
}

fn journal_from_row(row: &PgRow) -> Result<Journal, StoreError> {
    let getter = |e: sqlx::Error| StoreError::Database(e.to_string());
    Ok(Journal {
        id: row.try_get("id").map_err(getter)?,
        date: row.try_get("date").map_err(getter)?,
        todos: row.try_get::<Json<Vec<Todo>>, _>("todos").map_err(getter)?.0,
        reflections: row.try_get::<Json<Vec<Reflection>>, _>("reflections").map_err(getter)?.0,
        book_summaries: row
            .try_get::<Json<Vec<BookSummary>>, _>("book_summaries")
            .map_err(getter)?
            .0,
        quotes: row.try_get::<Json<Vec<Quote>>, _>("quotes").map_err(getter)?.0,
        words_of_today: row
            .try_get::<Json<Vec<WordOfToday>>, _>("words_of_today")
            .map_err(getter)?
            .0,
        user_id: row.try_get("user_id").map_err(getter)?,
    })
}

fn monthly_from_row(row: &PgRow) -> Result<Monthly, StoreError> {
    let getter = |e: sqlx::Error| StoreError::Database(e.to_string());
    Ok(Monthly {
        id: row.try_get("id").map_err(getter)?,
        date: row.try_get("date").map_err(getter)?,
        content: row.try_get("content").map_err(getter)?,
        user_id: row.try_get("user_id").map_err(getter)?,
    })
}

#[async_trait]
impl Store for PgStore {
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>("SELECT id, username, name, password_hash FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, name, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn users(&self) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, name, password_hash FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        sqlx::query("INSERT INTO users (id, username, name, password_hash) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.name)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(user)
    }

    async fn journal_by_id(&self, id: Uuid) -> Result<Option<Journal>, StoreError> {
        let row = sqlx::query("SELECT * FROM journals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        row.as_ref().map(journal_from_row).transpose()
    }

    async fn journals_by_owner(&self, owner: Uuid) -> Result<Vec<Journal>, StoreError> {
        let rows = sqlx::query("SELECT * FROM journals WHERE user_id = $1 ORDER BY date")
            .bind(owner)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        rows.iter().map(journal_from_row).collect()
    }

    async fn journal_by_owner_and_date(
        &self,
        owner: Uuid,
        date: NaiveDate,
        excluding: Option<Uuid>,
    ) -> Result<Option<Journal>, StoreError> {
        let row = sqlx::query(
            "SELECT * FROM journals WHERE user_id = $1 AND date = $2 AND ($3::uuid IS NULL OR id <> $3)",
        )
        .bind(owner)
        .bind(date)
        .bind(excluding)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        row.as_ref().map(journal_from_row).transpose()
    }

    async fn insert_journal(&self, journal: Journal) -> Result<Journal, StoreError> {
        sqlx::query(
            "INSERT INTO journals (id, date, todos, reflections, book_summaries, quotes, words_of_today, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(journal.id)
        .bind(journal.date)
        .bind(Json(&journal.todos))
        .bind(Json(&journal.reflections))
        .bind(Json(&journal.book_summaries))
        .bind(Json(&journal.quotes))
        .bind(Json(&journal.words_of_today))
        .bind(journal.user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(journal)
    }

    async fn update_journal(&self, journal: Journal) -> Result<Journal, StoreError> {
        let result = sqlx::query(
            "UPDATE journals SET date = $2, todos = $3, reflections = $4, book_summaries = $5, \
             quotes = $6, words_of_today = $7 WHERE id = $1",
        )
        .bind(journal.id)
        .bind(journal.date)
        .bind(Json(&journal.todos))
        .bind(Json(&journal.reflections))
        .bind(Json(&journal.book_summaries))
        .bind(Json(&journal.quotes))
        .bind(Json(&journal.words_of_today))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Database(format!("journal {} does not exist", journal.id)));
        }
        Ok(journal)
    }

    async fn delete_journal(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM journals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn monthly_by_id(&self, id: Uuid) -> Result<Option<Monthly>, StoreError> {
        let row = sqlx::query("SELECT * FROM monthlies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        row.as_ref().map(monthly_from_row).transpose()
    }

    async fn monthlies_by_owner(&self, owner: Uuid) -> Result<Vec<Monthly>, StoreError> {
        let rows = sqlx::query("SELECT * FROM monthlies WHERE user_id = $1 ORDER BY date")
            .bind(owner)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        rows.iter().map(monthly_from_row).collect()
    }

    async fn insert_monthly(&self, monthly: Monthly) -> Result<Monthly, StoreError> {
        sqlx::query("INSERT INTO monthlies (id, date, content, user_id) VALUES ($1, $2, $3, $4)")
            .bind(monthly.id)
            .bind(monthly.date)
            .bind(&monthly.content)
            .bind(monthly.user_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(monthly)
    }

    async fn update_monthly(&self, monthly: Monthly) -> Result<Monthly, StoreError> {
        let result = sqlx::query("UPDATE monthlies SET date = $2, content = $3 WHERE id = $1")
            .bind(monthly.id)
            .bind(monthly.date)
            .bind(&monthly.content)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Database(format!("monthly {} does not exist", monthly.id)));
        }
        Ok(monthly)
    }

    async fn delete_monthly(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM monthlies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }
}
