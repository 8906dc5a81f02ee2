pub mod journal;
pub mod monthly;
pub mod user;

pub use journal::{BookSummary, Journal, JournalDraft, Quote, Reflection, Todo, WordOfToday};
pub use monthly::{Monthly, MonthlyDraft};
pub use user::User;
