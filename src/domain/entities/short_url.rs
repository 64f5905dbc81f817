//! Short URL entity representing a slug-to-destination mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted mapping from a slug to its destination URL.
///
/// Records are created once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortUrl {
    pub slug: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(slug: String, destination: String, created_at: DateTime<Utc>) -> Self {
        Self {
            slug,
            destination,
            created_at,
        }
    }

    /// Builds the public short URL for this record.
    ///
    /// Without a base URL the result is the root-relative path `/{slug}`.
    pub fn short_url(&self, base_url: Option<&str>) -> String {
        match base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), self.slug),
            None => format!("/{}", self.slug),
        }
    }
}

/// Input data for creating a new short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShortUrlParams {
    pub destination: String,
}

impl CreateShortUrlParams {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}
