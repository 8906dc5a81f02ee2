use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A monthly summary entry. Unlike journals there is no per-date
/// uniqueness rule, but ownership on mutation works the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monthly {
    pub id: Uuid,
    pub date: NaiveDate,
    pub content: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyDraft {
    pub date: Option<String>,
    pub content: Option<String>,
}

impl MonthlyDraft {
    pub fn from_value(value: Value) -> Result<Self, String> {
        serde_json::from_value(value).map_err(|e| e.to_string())
    }
}
