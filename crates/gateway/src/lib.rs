//! HTTP client for the external vision-model gateway.
//!
//! Provides typed chat-completion wire structs, a bounded retry state
//! machine with linear backoff, and a client that classifies each attempt
//! as a success, a retryable transient failure, or a terminal failure.

pub mod client;
pub mod retry;
pub mod wire;

pub use client::{GatewayClient, GatewayError};
