// HTTP boundary error type. Every failure in the system is converted into
// an ApiError exactly once, here; handlers and services never format
// responses for the failure path themselves.
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::AuthError;
use crate::database::StoreError;
use crate::services::account_service::AccountError;
use crate::services::journal_service::JournalError;
use crate::services::monthly_service::MonthlyError;

#[derive(Debug)]
pub enum ApiError {
    // 400
    BadRequest(String),
    Validation(String),
    // 401 - covers missing/invalid tokens, unresolved users and
    // ownership denials alike; they differ only by message
    Unauthorized(String),
    // 404, empty body
    NotFound,
    // 409 - fixed message strings, part of the wire contract
    Conflict(String),
    // 500
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => msg,
            ApiError::NotFound => "",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingSecret => ApiError::Internal(err.to_string()),
            // MissingToken, InvalidToken, UserNotFound, BadCredentials
            _ => ApiError::Unauthorized(err.to_string()),
        }
    }
}

impl From<JournalError> for ApiError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::EmptyContent | JournalError::DuplicateDate(_) => {
                ApiError::Conflict(err.to_string())
            }
            JournalError::ForeignOwner(_) => ApiError::Unauthorized(err.to_string()),
            JournalError::MissingDate | JournalError::MalformedDate => {
                ApiError::Validation(err.to_string())
            }
            JournalError::NotFound => ApiError::NotFound,
            // The record vanished between lookup and mutation. Part of the
            // wire contract: a stable 401 body, never a crash.
            JournalError::Vanished => ApiError::Unauthorized("resource not found".to_string()),
            JournalError::Store(e) => e.into(),
        }
    }
}

impl From<MonthlyError> for ApiError {
    fn from(err: MonthlyError) -> Self {
        match err {
            MonthlyError::MissingDate
            | MonthlyError::MalformedDate
            | MonthlyError::MissingContent => ApiError::Validation(err.to_string()),
            MonthlyError::ForeignOwner(_) => ApiError::Unauthorized(err.to_string()),
            MonthlyError::NotFound => ApiError::NotFound,
            MonthlyError::Vanished => ApiError::Unauthorized("resource not found".to_string()),
            MonthlyError::Store(e) => e.into(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Store(e) => e.into(),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // Reaching this without service-level context means the unique
            // index caught a race the fast path missed; create is the only
            // unguarded path.
            StoreError::DuplicateDate => {
                ApiError::Conflict("cannot post a journal with a duplicated date".to_string())
            }
            StoreError::DuplicateUsername => {
                ApiError::Validation("username must be unique".to_string())
            }
            StoreError::Database(msg) => {
                tracing::error!("database error: {}", msg);
                ApiError::Internal("internal server error".to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self {
            ApiError::NotFound => status.into_response(),
            ApiError::Internal(msg) => {
                tracing::error!("request failed: {}", msg);
                (status, Json(json!({ "error": "internal server error" }))).into_response()
            }
            other => (status, Json(json!({ "error": other.message() }))).into_response(),
        }
    }
}
