//! Gateway client with bounded retry and outcome classification.
//!
//! One analysis request makes up to [`MAX_ATTEMPTS`] HTTP attempts against
//! the chat-completions endpoint. Transport errors and HTTP 5xx responses
//! are transient and drive the retry machine; every other failure is
//! terminal and surfaces immediately. The raw upstream status of an
//! exhausted retry sequence is never returned to callers.

use std::time::Duration;

use crate::retry::{RetryState, MAX_ATTEMPTS};
use crate::wire::{coaching_messages, ChatCompletionRequest, ChatCompletionResponse};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Terminal failures of one gateway analysis call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Every attempt failed at the transport level.
    #[error("AI gateway unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Every attempt was answered with a server error.
    #[error("AI gateway returned a server error on every attempt")]
    Unavailable,

    /// HTTP 429.
    #[error("AI gateway rate limit exceeded")]
    RateLimited,

    /// HTTP 402.
    #[error("AI gateway credits exhausted")]
    QuotaExhausted,

    /// Any other non-2xx status.
    #[error("AI gateway request failed with HTTP {status}")]
    Upstream {
        /// Upstream status code, logged but not surfaced to callers.
        status: u16,
    },

    /// 2xx response without usable completion content.
    #[error("AI gateway returned no completion content")]
    EmptyReply,
}

/// Why an attempt is eligible for retry.
#[derive(Debug, thiserror::Error)]
enum TransientCause {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("upstream HTTP {0}")]
    ServerError(u16),
}

impl TransientCause {
    /// Map the final transient failure to the caller-facing error.
    fn into_exhausted(self) -> GatewayError {
        match self {
            TransientCause::Network(err) => GatewayError::Unreachable(err),
            TransientCause::ServerError(_) => GatewayError::Unavailable,
        }
    }
}

/// Classification of one attempt's failure.
enum AttemptError {
    /// Eligible for retry.
    Transient(TransientCause),
    /// Breaks the retry loop immediately.
    Terminal(GatewayError),
}

/// Classify a non-2xx, non-5xx status into its terminal error.
fn classify_terminal(status: u16) -> GatewayError {
    match status {
        429 => GatewayError::RateLimited,
        402 => GatewayError::QuotaExhausted,
        other => GatewayError::Upstream { status: other },
    }
}

// ---------------------------------------------------------------------------
// GatewayClient
// ---------------------------------------------------------------------------

/// HTTP client for the external vision-model gateway.
pub struct GatewayClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl GatewayClient {
    /// Create a client with a per-attempt request timeout.
    ///
    /// * `endpoint` - Full chat-completions URL,
    ///   e.g. `https://ai.gateway.lovable.dev/v1/chat/completions`.
    /// * `model` - Vision-capable model identifier.
    pub fn new(endpoint: String, model: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            endpoint,
            model,
        }
    }

    /// Submit the coaching analysis prompt for a list of frames and return
    /// the model's reply text.
    ///
    /// Retries transient failures up to [`MAX_ATTEMPTS`] attempts with
    /// linear backoff before giving up.
    pub async fn request_analysis(
        &self,
        api_key: &str,
        frames: &[String],
    ) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: coaching_messages(frames),
        };

        let mut state = RetryState::start();
        let mut last_transient: Option<TransientCause> = None;

        loop {
            match state {
                RetryState::Attempting { attempt } => {
                    match self.try_complete(api_key, &body).await {
                        Ok(reply) => return Ok(reply),
                        Err(AttemptError::Transient(cause)) => {
                            tracing::warn!(
                                attempt,
                                max_attempts = MAX_ATTEMPTS,
                                error = %cause,
                                "Transient AI gateway failure"
                            );
                            state = RetryState::after_transient_failure(attempt);
                            last_transient = Some(cause);
                        }
                        Err(AttemptError::Terminal(err)) => return Err(err),
                    }
                }
                RetryState::Retrying { delay, .. } => {
                    tokio::time::sleep(delay).await;
                    state = state.next_attempt();
                }
                RetryState::Exhausted => {
                    tracing::error!("AI gateway retry budget exhausted");
                    // Exhausted is only reachable after a transient failure.
                    return Err(match last_transient.take() {
                        Some(cause) => cause.into_exhausted(),
                        None => GatewayError::Unavailable,
                    });
                }
            }
        }
    }

    /// Execute a single attempt and classify its outcome.
    async fn try_complete(
        &self,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<String, AttemptError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| AttemptError::Transient(TransientCause::Network(err)))?;

        let status = response.status();

        if status.is_server_error() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(status = status.as_u16(), body = %text, "AI gateway server error");
            return Err(AttemptError::Transient(TransientCause::ServerError(
                status.as_u16(),
            )));
        }

        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::error!(status = status.as_u16(), body = %text, "AI gateway error");
            return Err(AttemptError::Terminal(classify_terminal(status.as_u16())));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|_| AttemptError::Terminal(GatewayError::EmptyReply))?;

        completion
            .into_reply()
            .ok_or(AttemptError::Terminal(GatewayError::EmptyReply))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
