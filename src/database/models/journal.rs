use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub task: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub title: String,
    #[serde(default)]
    pub chapter: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordOfToday {
    pub word: String,
    pub definition: String,
}

/// One journal entry. At most one per `(user_id, date)` pair, and never
/// persisted with all five collections empty. Owner and id are immutable
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub id: Uuid,
    pub date: NaiveDate,
    pub todos: Vec<Todo>,
    pub reflections: Vec<Reflection>,
    pub book_summaries: Vec<BookSummary>,
    pub quotes: Vec<Quote>,
    pub words_of_today: Vec<WordOfToday>,
    pub user_id: Uuid,
}

/// Incoming journal payload. The date stays a raw string here: the
/// content-emptiness check runs before date validation, so a draft must be
/// representable without a usable date. Unknown fields (`id`, `user_id`)
/// are dropped on parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JournalDraft {
    pub date: Option<String>,
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub reflections: Vec<Reflection>,
    #[serde(default)]
    pub book_summaries: Vec<BookSummary>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub words_of_today: Vec<WordOfToday>,
}

impl JournalDraft {
    pub fn from_value(value: Value) -> Result<Self, String> {
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    /// True when every one of the five collections is empty or was absent.
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
            && self.reflections.is_empty()
            && self.book_summaries.is_empty()
            && self.quotes.is_empty()
            && self.words_of_today.is_empty()
    }
}
