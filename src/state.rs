//! Shared application state.

use std::sync::Arc;

use crate::domain::repositories::ShortUrlStore;

/// State injected into every handler.
///
/// Handlers keep nothing between requests; the store is the only shared
/// resource and does its own synchronization.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ShortUrlStore>,
    /// Public prefix used to build `short_url` in responses.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn ShortUrlStore>, base_url: Option<String>) -> Self {
        Self { store, base_url }
    }
}
