use std::time::Duration;

use reqwest::StatusCode;

/// Total attempts for a single logical request, first try included.
pub const MAX_ATTEMPTS: u32 = 3;

const BASE_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RetryDecision {
    pub retry: bool,
    pub delay: Duration,
}

/// Backoff policy, independent of the transport: only 429 and 5xx are
/// retryable, with exponential delay. Every other status is surfaced
/// immediately.
pub fn decide(status: StatusCode, attempt: u32) -> RetryDecision {
    let transient = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
    if !transient || attempt >= MAX_ATTEMPTS {
        return RetryDecision {
            retry: false,
            delay: Duration::ZERO,
        };
    }

    RetryDecision {
        retry: true,
        delay: Duration::from_millis(BASE_DELAY_MS << (attempt - 1)),
    }
}
