//! API route configuration.

use crate::api::handlers::{create_short_url_handler, health_handler, redirect_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /`             - Create a short URL
/// - `GET  /healthcheck`  - Liveness probe
/// - `GET  /{slug}`       - Redirect to the destination
///
/// The static `/healthcheck` route wins over `/{slug}`, so no slug can
/// shadow it.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_short_url_handler))
        .route("/healthcheck", get(health_handler))
        .route("/{slug}", get(redirect_handler))
}
