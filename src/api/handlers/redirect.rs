//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its destination.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Response Codes
///
/// - **301 Moved Permanently** with `Location: <destination>`
/// - **404 Not Found** if the slug does not exist
/// - **500 Internal Server Error** if the store failed; details are only logged
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Some(short_url) = state.store.get_short_url_by_slug(&slug).await? else {
        debug!(%slug, "Slug not found");
        return Err(AppError::not_found(
            "Short URL not found",
            json!({ "slug": slug }),
        ));
    };

    let location = HeaderValue::from_str(&short_url.destination).map_err(|e| {
        error!(%slug, "Stored destination is not a valid header value: {}", e);
        AppError::internal("Internal server error", json!({}))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
