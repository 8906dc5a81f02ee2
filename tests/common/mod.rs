use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use journal_api_rust::auth::TokenCodec;
use journal_api_rust::config::SecurityConfig;
use journal_api_rust::database::memory::MemoryStore;
use journal_api_rust::{app, AppState};

/// In-process application over the in-memory store. Every test builds its
/// own instance, so suites stay independent without shared setup.
pub struct TestApp {
    router: Router,
}

#[allow(dead_code)]
impl TestApp {
    pub fn spawn() -> Self {
        let security =
            SecurityConfig { jwt_secret: "test-secret".to_string(), jwt_expiry_hours: 1 };
        let codec = TokenCodec::new(&security).expect("test codec");
        let state = AppState { store: Arc::new(MemoryStore::new()), codec: Arc::new(codec) };
        Self { router: app(state) }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value, String)> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("bearer {}", token));
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await.context("request failed")?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let text = String::from_utf8(bytes.to_vec())?;
        let value = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok((status, value, text))
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value, String)> {
        self.request(Method::GET, path, token, None).await
    }

    /// GET with a verbatim Authorization header value, for exercising the
    /// extraction stage directly.
    pub async fn get_with_auth_header(
        &self,
        path: &str,
        header_value: &str,
    ) -> Result<(StatusCode, Value, String)> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(header::AUTHORIZATION, header_value)
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await.context("request failed")?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let text = String::from_utf8(bytes.to_vec())?;
        let value = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok((status, value, text))
    }

    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> Result<(StatusCode, Value, String)> {
        self.request(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> Result<(StatusCode, Value, String)> {
        self.request(Method::PUT, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value, String)> {
        self.request(Method::DELETE, path, token, None).await
    }

    /// Register an account and log in, returning a usable bearer token.
    pub async fn register_and_login(&self, username: &str) -> Result<String> {
        let (status, _, text) = self
            .post(
                "/api/users",
                None,
                json!({ "username": username, "name": username, "password": "sekret" }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "register failed ({}): {}", status, text);

        let (status, body, text) = self
            .post("/api/login", None, json!({ "username": username, "password": "sekret" }))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed ({}): {}", status, text);
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response carried no token")
    }

    /// Post a journal and return its wire representation.
    pub async fn post_journal(&self, token: &str, body: Value) -> Result<Value> {
        let (status, value, text) = self.post("/api/journals", Some(token), body).await?;
        anyhow::ensure!(status == StatusCode::OK, "post journal failed ({}): {}", status, text);
        Ok(value)
    }

    pub async fn journal_count(&self, token: &str) -> Result<usize> {
        let (_, value, _) = self.get("/api/journals", Some(token)).await?;
        value.as_array().map(Vec::len).context("journal list was not an array")
    }
}

#[allow(dead_code)]
pub fn journal_fixture(date: &str) -> Value {
    json!({
        "date": date,
        "todos": [{ "task": "water the plants", "done": false }],
        "reflections": [{ "content": "a quiet day" }],
        "quotes": [{ "content": "what gets measured gets managed" }]
    })
}
