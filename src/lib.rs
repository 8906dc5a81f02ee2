pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use auth::TokenCodec;
use database::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub codec: Arc<TokenCodec>,
}

/// Build the full router. Route classification is explicit: public routes
/// never pass enforcement, protected routers carry `require_auth` as a
/// route layer. Token extraction wraps everything.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(public_routes(state.clone()))
        .merge(journal_routes(state.clone()))
        .merge(monthly_routes(state))
        .fallback(unknown_endpoint)
        .layer(from_fn(middleware::token_extractor))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes(state: AppState) -> Router {
    use axum::routing::post;
    use handlers::public::{login, users};

    Router::new()
        .route("/api/login", post(login::login))
        .route("/api/users", get(users::list).post(users::create))
        .with_state(state)
}

fn journal_routes(state: AppState) -> Router {
    use handlers::protected::journals;

    Router::new()
        .route("/api/journals", get(journals::list).post(journals::create))
        .route(
            "/api/journals/:id",
            get(journals::get).put(journals::update).delete(journals::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .with_state(state)
}

fn monthly_routes(state: AppState) -> Router {
    use handlers::protected::monthlies;

    Router::new()
        .route("/api/monthlies", get(monthlies::list).post(monthlies::create))
        .route(
            "/api/monthlies/:id",
            get(monthlies::get).put(monthlies::update).delete(monthlies::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": chrono::Utc::now() }))
}

async fn unknown_endpoint() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "unknown endpoint" })))
}
