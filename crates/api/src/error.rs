use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use formsight_core::error::CoreError;
use formsight_gateway::GatewayError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`GatewayError`] for upstream
/// failures. Implements [`IntoResponse`] to produce consistent
/// `{ "error": ... }` JSON bodies; upstream detail is logged server-side
/// and never exposed to callers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `formsight_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure from the external AI gateway.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Configuration(msg) => {
                    tracing::error!(error = %msg, "Service misconfigured");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "AI service not configured".to_string(),
                    )
                }
            },

            // --- GatewayError variants ---
            AppError::Gateway(gateway) => classify_gateway_error(gateway),
        };

        let body = json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a gateway failure to an HTTP status and caller-facing message.
///
/// - 429 and 402 pass through as rate-limit / quota statuses.
/// - Retry-exhausted transient faults map to 503.
/// - Everything else maps to 500 with a sanitized message.
fn classify_gateway_error(err: &GatewayError) -> (StatusCode, String) {
    match err {
        GatewayError::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded. Please try again in a moment.".to_string(),
        ),
        GatewayError::QuotaExhausted => (
            StatusCode::PAYMENT_REQUIRED,
            "AI credits exhausted. Please add credits to continue.".to_string(),
        ),
        GatewayError::Unreachable(cause) => {
            tracing::error!(error = %cause, "AI gateway unreachable after all retries");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI service temporarily unreachable. Please retry shortly.".to_string(),
            )
        }
        GatewayError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            "AI service temporarily unavailable. Please retry shortly.".to_string(),
        ),
        GatewayError::Upstream { status } => {
            tracing::error!(status, "Unclassified AI gateway error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to analyze video".to_string(),
            )
        }
        GatewayError::EmptyReply => {
            tracing::error!("AI gateway produced no analysis");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "No analysis generated".to_string(),
            )
        }
    }
}
