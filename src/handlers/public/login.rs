use axum::{extract::State, response::IntoResponse, Json};

use crate::error::ApiError;
use crate::services::account_service::Credentials;
use crate::services::AccountService;
use crate::AppState;

/// POST /api/login - exchange credentials for a signed bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let session =
        AccountService::new(state.store.as_ref()).login(&state.codec, credentials).await?;
    Ok(Json(session))
}
