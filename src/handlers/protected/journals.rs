use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::Value;

use crate::database::models::JournalDraft;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::services::JournalService;
use crate::AppState;

use super::utils::parse_id;

/// GET /api/journals - all journals owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let journals = JournalService::new(state.store.as_ref()).list(&user).await?;
    Ok(Json(journals))
}

/// GET /api/journals/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let journal = JournalService::new(state.store.as_ref()).get(&user, id).await?;
    Ok(Json(journal))
}

/// POST /api/journals - responds 200 with the created journal, not 201
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = JournalDraft::from_value(body).map_err(ApiError::validation)?;
    let journal = JournalService::new(state.store.as_ref()).create(&user, draft).await?;
    Ok(Json(journal))
}

/// PUT /api/journals/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let draft = JournalDraft::from_value(body).map_err(ApiError::validation)?;
    let journal = JournalService::new(state.store.as_ref()).update(&user, id, draft).await?;
    Ok(Json(journal))
}

/// DELETE /api/journals/:id - 204, empty body
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    JournalService::new(state.store.as_ref()).delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
