pub mod auth;
pub mod token;

pub use auth::{require_auth, CurrentUser};
pub use token::{token_extractor, BearerToken};
