//! Short URL store implementations.
//!
//! # Stores
//!
//! - [`InMemoryShortUrlStore`] - Concurrent in-process map, the default backend
//! - [`PgShortUrlStore`] - PostgreSQL table with a unique slug constraint

pub mod memory_store;
pub mod pg_store;

pub use memory_store::InMemoryShortUrlStore;
pub use pg_store::{PgSettings, PgShortUrlStore};
