//! Core domain entities.
//!
//! - [`ShortUrl`] - A persisted slug-to-destination mapping
//! - [`CreateShortUrlParams`] - Input for creating a new mapping

pub mod short_url;

pub use short_url::{CreateShortUrlParams, ShortUrl};
