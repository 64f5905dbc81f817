//! Domain layer containing business entities and the storage contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - The [`repositories::ShortUrlStore`] trait and its errors
//! - [`slug`] - Slug generation and bounded collision retry
//!
//! The domain layer has no dependencies on infrastructure or HTTP concerns.

pub mod entities;
pub mod repositories;
pub mod slug;
