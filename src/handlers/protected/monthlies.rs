use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::Value;

use crate::database::models::MonthlyDraft;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::services::MonthlyService;
use crate::AppState;

use super::utils::parse_id;

/// GET /api/monthlies
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let monthlies = MonthlyService::new(state.store.as_ref()).list(&user).await?;
    Ok(Json(monthlies))
}

/// GET /api/monthlies/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let monthly = MonthlyService::new(state.store.as_ref()).get(&user, id).await?;
    Ok(Json(monthly))
}

/// POST /api/monthlies
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = MonthlyDraft::from_value(body).map_err(ApiError::validation)?;
    let monthly = MonthlyService::new(state.store.as_ref()).create(&user, draft).await?;
    Ok(Json(monthly))
}

/// PUT /api/monthlies/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let draft = MonthlyDraft::from_value(body).map_err(ApiError::validation)?;
    let monthly = MonthlyService::new(state.store.as_ref()).update(&user, id, draft).await?;
    Ok(Json(monthly))
}

/// DELETE /api/monthlies/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    MonthlyService::new(state.store.as_ref()).delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
