#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use short_url::api::middleware::tracing;
use short_url::api::routes::routes;
use short_url::domain::entities::{CreateShortUrlParams, ShortUrl};
use short_url::domain::repositories::{ShortUrlStore, StoreError, StoreResult};
use short_url::infrastructure::persistence::InMemoryShortUrlStore;
use short_url::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "https://s.example.com";

pub fn create_test_state() -> (AppState, Arc<InMemoryShortUrlStore>) {
    let store = Arc::new(InMemoryShortUrlStore::new());
    let state = AppState::new(store.clone(), Some(BASE_URL.to_string()));
    (state, store)
}

pub fn create_test_router(state: AppState) -> Router {
    routes().with_state(state).layer(tracing::layer())
}

/// Store whose every call fails with a backend error.
pub struct FailingStore;

#[async_trait]
impl ShortUrlStore for FailingStore {
    async fn create_short_url(&self, _params: CreateShortUrlParams) -> StoreResult<ShortUrl> {
        Err(StoreError::Storage("connection refused".to_string()))
    }

    async fn get_short_url_by_slug(&self, _slug: &str) -> StoreResult<Option<ShortUrl>> {
        Err(StoreError::Storage("connection refused".to_string()))
    }
}

/// Store that takes `delay` to answer lookups and never finds anything.
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl ShortUrlStore for SlowStore {
    async fn create_short_url(&self, _params: CreateShortUrlParams) -> StoreResult<ShortUrl> {
        Err(StoreError::Conflict { attempts: 1 })
    }

    async fn get_short_url_by_slug(&self, _slug: &str) -> StoreResult<Option<ShortUrl>> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }
}
