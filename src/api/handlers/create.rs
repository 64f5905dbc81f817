//! Handler for short URL creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::info;
use validator::Validate;

use crate::api::dto::short_url::{CreateShortUrlRequest, ShortUrlResponse};
use crate::domain::entities::CreateShortUrlParams;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a destination.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// { "destination": "http://google.com" }
/// ```
///
/// # Response
///
/// `201 Created` with a `Location` header pointing at the short URL:
///
/// ```json
/// {
///   "slug": "aZ3kQ9x",
///   "destination": "http://google.com",
///   "short_url": "https://s.example.com/aZ3kQ9x",
///   "created_at": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is missing, malformed, or the destination is blank
/// - 500 Internal Server Error if no free slug was found or the store failed
pub async fn create_short_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let short_url = state
        .store
        .create_short_url(CreateShortUrlParams::new(payload.destination.trim()))
        .await?;

    info!(slug = %short_url.slug, "Short URL created");

    let body = ShortUrlResponse::new(short_url, state.base_url.as_deref());
    let location = body.short_url.clone();

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)))
}
