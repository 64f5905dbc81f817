//! DTOs for creating and returning short URLs.

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::ShortUrl;

/// Request to create a short URL.
///
/// ```json
/// { "destination": "http://google.com" }
/// ```
///
/// `url` is accepted as an alias for `destination`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    #[serde(alias = "url")]
    #[validate(custom(function = "validate_destination"))]
    pub destination: String,
}

/// Destination must be non-blank and must fit in a `Location` header.
///
/// Deeper URL checks are left to the caller.
fn validate_destination(destination: &str) -> Result<(), ValidationError> {
    let trimmed = destination.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::new("empty").with_message("Destination must not be empty".into()));
    }

    if HeaderValue::from_str(trimmed).is_err() {
        return Err(ValidationError::new("invalid_characters")
            .with_message("Destination contains characters not allowed in a URL".into()));
    }

    Ok(())
}

/// A created short URL as returned to clients.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub slug: String,
    pub destination: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrlResponse {
    pub fn new(short_url: ShortUrl, base_url: Option<&str>) -> Self {
        let public_url = short_url.short_url(base_url);

        Self {
            slug: short_url.slug,
            destination: short_url.destination,
            short_url: public_url,
            created_at: short_url.created_at,
        }
    }
}
