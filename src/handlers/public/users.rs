use axum::{extract::State, response::IntoResponse, Json};

use crate::error::ApiError;
use crate::services::account_service::NewUser;
use crate::services::AccountService;
use crate::AppState;

/// POST /api/users - register a new account
pub async fn create(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = AccountService::new(state.store.as_ref()).register(new_user).await?;
    Ok(Json(user))
}

/// GET /api/users - public listing; password hashes never serialize
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = AccountService::new(state.store.as_ref()).list().await?;
    Ok(Json(users))
}
