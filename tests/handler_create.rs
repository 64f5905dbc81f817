mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use short_url::domain::repositories::ShortUrlStore;
use short_url::domain::slug::is_base62;
use short_url::state::AppState;
use std::sync::Arc;

#[tokio::test]
async fn test_create_short_url() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server
        .post("/")
        .json(&json!({ "destination": "http://google.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let slug = body["slug"].as_str().unwrap();
    assert_eq!(slug.len(), 7);
    assert!(is_base62(slug));
    assert_eq!(body["destination"], "http://google.com");
    assert_eq!(body["short_url"], format!("{}/{}", common::BASE_URL, slug));
    assert!(body["created_at"].is_string());
    assert_eq!(
        response.header("location"),
        format!("{}/{}", common::BASE_URL, slug).as_str()
    );

    let stored = store.get_short_url_by_slug(slug).await.unwrap().unwrap();
    assert_eq!(stored.destination, "http://google.com");
}

#[tokio::test]
async fn test_create_accepts_url_alias() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server
        .post("/")
        .json(&json!({ "url": "https://example.com/docs" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["destination"], "https://example.com/docs");
}

#[tokio::test]
async fn test_create_without_base_url_is_relative() {
    let (state, _store) = common::create_test_state();
    let state = AppState::new(state.store, None);
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server
        .post("/")
        .json(&json!({ "destination": "http://google.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(
        body["short_url"],
        format!("/{}", body["slug"].as_str().unwrap())
    );
}

#[tokio::test]
async fn test_same_destination_twice_gets_two_slugs() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let first = server
        .post("/")
        .json(&json!({ "destination": "http://google.com" }))
        .await
        .json::<Value>();
    let second = server
        .post("/")
        .json(&json!({ "destination": "http://google.com" }))
        .await
        .json::<Value>();

    assert_ne!(first["slug"], second["slug"]);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_create_rejects_invalid_bodies() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let cases = [
        json!({ "destination": "" }),
        json!({ "destination": "   " }),
        json!({ "destination": 42 }),
        json!({ "other": "http://google.com" }),
    ];

    for body in cases {
        let response = server.post("/").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    let response = server.post("/").text("not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_storage_failure() {
    let state = AppState::new(Arc::new(common::FailingStore), None);
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server
        .post("/")
        .json(&json!({ "destination": "http://google.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "internal_error");
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_create_slug_exhaustion() {
    let state = AppState::new(
        Arc::new(common::SlowStore {
            delay: std::time::Duration::ZERO,
        }),
        None,
    );
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server
        .post("/")
        .json(&json!({ "destination": "http://google.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "slug_space_exhausted"
    );
}
