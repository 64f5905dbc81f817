//! Storage trait definitions for the domain layer.
//!
//! Concrete stores live in `crate::infrastructure::persistence`. Mock
//! implementations are generated via `mockall` for testing.

pub mod short_url_store;

pub use short_url_store::{ShortUrlStore, StoreError, StoreResult};

pub(crate) use short_url_store::ensure_destination;

#[cfg(test)]
pub use short_url_store::MockShortUrlStore;
