mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn registration_returns_the_public_user_without_the_hash() -> Result<()> {
    let app = TestApp::spawn();
    let (status, body, _) = app
        .post(
            "/api/users",
            None,
            json!({ "username": "alice", "name": "Alice", "password": "sekret" }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn login_returns_a_token_that_opens_protected_routes() -> Result<()> {
    let app = TestApp::spawn();
    app.post("/api/users", None, json!({ "username": "alice", "name": "Alice", "password": "sekret" }))
        .await?;

    let (status, body, _) =
        app.post("/api/login", None, json!({ "username": "alice", "password": "sekret" })).await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["username"], "alice");

    let (status, _, _) = app.get("/api/journals", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn wrong_credentials_are_rejected_uniformly() -> Result<()> {
    let app = TestApp::spawn();
    app.post("/api/users", None, json!({ "username": "alice", "name": "Alice", "password": "sekret" }))
        .await?;

    for creds in [
        json!({ "username": "alice", "password": "wrong" }),
        json!({ "username": "nobody", "password": "sekret" }),
    ] {
        let (status, body, _) = app.post("/api/login", None, creds).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid username or password");
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() -> Result<()> {
    let app = TestApp::spawn();
    let user = json!({ "username": "alice", "name": "Alice", "password": "sekret" });
    app.post("/api/users", None, user.clone()).await?;

    let (status, body, _) = app.post("/api/users", None, user).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "username must be unique");
    Ok(())
}

#[tokio::test]
async fn short_credentials_are_rejected() -> Result<()> {
    let app = TestApp::spawn();

    let (status, body, _) = app
        .post("/api/users", None, json!({ "username": "al", "name": "Al", "password": "sekret" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "username must be at least 3 characters long");

    let (status, body, _) = app
        .post("/api/users", None, json!({ "username": "alice", "name": "Alice", "password": "pw" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password must be at least 3 characters long");
    Ok(())
}

#[tokio::test]
async fn user_listing_is_public_and_hash_free() -> Result<()> {
    let app = TestApp::spawn();
    app.post("/api/users", None, json!({ "username": "alice", "name": "Alice", "password": "sekret" }))
        .await?;

    let (status, body, _) = app.get("/api/users", None).await?;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("password_hash").is_none());
    Ok(())
}
