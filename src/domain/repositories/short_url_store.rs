//! Storage contract for short URLs.

use crate::domain::entities::{CreateShortUrlParams, ShortUrl};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a [`ShortUrlStore`].
///
/// A missing slug is not an error: lookups return `Ok(None)` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No free slug was found within the retry bound.
    #[error("no free slug found after {attempts} attempts")]
    Conflict { attempts: usize },

    /// The input was rejected before touching the backend.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backend failed (I/O, connectivity, corrupted data).
    #[error("storage error: {0}")]
    Storage(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence abstraction for slug-to-destination mappings.
///
/// Implementations must be safe to call concurrently from many request tasks.
/// Whatever locking is needed to keep slugs unique stays inside the
/// implementation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryShortUrlStore`] - concurrent map
/// - [`crate::infrastructure::persistence::PgShortUrlStore`] - PostgreSQL table
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlStore: Send + Sync {
    /// Allocates a fresh slug for the destination and persists the mapping.
    ///
    /// The returned slug resolves through [`Self::get_short_url_by_slug`]
    /// as soon as this call returns.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidInput`] if the destination is blank.
    ///
    /// Returns [`StoreError::Conflict`] when every attempt hit a taken slug.
    ///
    /// Returns [`StoreError::Storage`] on backend failure.
    async fn create_short_url(&self, params: CreateShortUrlParams) -> StoreResult<ShortUrl>;

    /// Looks up a mapping by exact slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortUrl))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] only when the backend itself fails.
    async fn get_short_url_by_slug(&self, slug: &str) -> StoreResult<Option<ShortUrl>>;
}

/// Rejects blank destinations. Shared by every store implementation.
pub(crate) fn ensure_destination(params: &CreateShortUrlParams) -> StoreResult<()> {
    if params.destination.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "destination must not be empty".to_string(),
        ));
    }
    Ok(())
}
