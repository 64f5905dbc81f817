mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use short_url::domain::entities::CreateShortUrlParams;
use short_url::domain::repositories::ShortUrlStore;
use short_url::domain::slug::{SlugAllocator, SlugGenerator};
use short_url::infrastructure::persistence::InMemoryShortUrlStore;
use short_url::state::AppState;
use std::sync::Arc;

struct FixedSlug(&'static str);

impl SlugGenerator for FixedSlug {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

#[tokio::test]
async fn test_redirect_known_slug() {
    let allocator = SlugAllocator::new(Arc::new(FixedSlug("123")), 1).unwrap();
    let store = Arc::new(InMemoryShortUrlStore::with_allocator(allocator));
    store
        .create_short_url(CreateShortUrlParams::new("http://google.com"))
        .await
        .unwrap();

    let state = AppState::new(store, None);
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server.get("/123").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "http://google.com");
}

#[tokio::test]
async fn test_create_then_redirect() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let created = server
        .post("/")
        .json(&json!({ "destination": "http://google.com" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let slug = created.json::<Value>()["slug"].as_str().unwrap().to_string();

    let response = server.get(&format!("/{}", slug)).await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "http://google.com");
}

#[tokio::test]
async fn test_redirect_unknown_slug() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server.get("/doesnotexist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
    assert!(response.headers().get("location").is_none());
}

#[tokio::test]
async fn test_redirect_storage_failure() {
    let state = AppState::new(Arc::new(common::FailingStore), None);
    let server = TestServer::new(common::create_test_router(state)).unwrap();

    let response = server.get("/abc1234").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get("location").is_none());
}
