pub mod account_service;
pub mod journal_service;
pub mod monthly_service;

pub use account_service::AccountService;
pub use journal_service::JournalService;
pub use monthly_service::MonthlyService;
