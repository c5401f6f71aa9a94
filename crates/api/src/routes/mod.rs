pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /analyze    submit video frames for coaching analysis (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/analyze", post(handlers::analyze::analyze_video))
}
