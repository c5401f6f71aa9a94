//! Bounded retry state machine with linear backoff.
//!
//! A gateway call makes up to [`MAX_ATTEMPTS`] attempts. After a transient
//! failure on attempt `n` the machine moves to `Retrying` with a delay of
//! `n * BACKOFF_STEP` (300ms, then 600ms), or to `Exhausted` once the
//! attempt budget is spent. Terminal failures never enter the machine; the
//! caller breaks out of the loop directly.

use std::time::Duration;

/// Total number of attempts, including the first.
pub const MAX_ATTEMPTS: u32 = 3;

/// Base delay unit for linear backoff.
pub const BACKOFF_STEP: Duration = Duration::from_millis(300);

/// Delay before the retry that follows attempt `attempt` (1-based).
pub fn backoff_delay(attempt: u32) -> Duration {
    BACKOFF_STEP * attempt
}

/// State of one bounded retry sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// An attempt is in flight.
    Attempting {
        /// 1-based attempt number.
        attempt: u32,
    },
    /// The last attempt failed transiently; sleep, then re-attempt.
    Retrying {
        /// The attempt that just failed.
        attempt: u32,
        /// Backoff to apply before the next attempt.
        delay: Duration,
    },
    /// The attempt budget is spent.
    Exhausted,
}

impl RetryState {
    /// Initial state: first attempt.
    pub fn start() -> Self {
        RetryState::Attempting { attempt: 1 }
    }

    /// Transition after a transient failure on the given attempt.
    pub fn after_transient_failure(attempt: u32) -> Self {
        if attempt >= MAX_ATTEMPTS {
            RetryState::Exhausted
        } else {
            RetryState::Retrying {
                attempt,
                delay: backoff_delay(attempt),
            }
        }
    }

    /// Transition out of `Retrying` into the next attempt.
    pub fn next_attempt(self) -> Self {
        match self {
            RetryState::Retrying { attempt, .. } => RetryState::Attempting {
                attempt: attempt + 1,
            },
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
