use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::AuthError;
use crate::database::models::User;
use crate::error::ApiError;
use crate::AppState;

use super::token::BearerToken;

/// The identity resolved for this request. Handlers trust it; nothing
/// downstream re-verifies the token.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Stage two of the gate, layered onto the protected routers only. A
/// request without a candidate token, with a token that fails the codec,
/// or whose subject no longer resolves to a stored user terminates here
/// with 401; a valid token for a deleted user is never authenticated.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .extensions()
        .get::<BearerToken>()
        .and_then(|candidate| candidate.0.clone())
        .ok_or(AuthError::MissingToken)?;

    let claims = state.codec.decode(&token)?;

    let user = state.store.user_by_id(claims.user_id).await?.ok_or(AuthError::UserNotFound)?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
