//! Delays inserted between attempts at one page.
//!
//! Three failure families, three schedules. They are never mixed:
//!
//! | Family | Delay before attempt `n + 1` |
//! |---|---|
//! | rate limited (429) | `base × 2ⁿ` |
//! | other non-success status | `base × n` |
//! | network fault or malformed payload | `step × n` |

use crate::config::FetchConfig;
use crate::ClientError;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    rate_limit_base: Duration,
    network_step: Duration,
}

impl BackoffPolicy {
    pub fn new(rate_limit_base: Duration, network_step: Duration) -> Self {
        Self {
            rate_limit_base,
            network_step,
        }
    }

    /// Exponential delay after a rate-limited attempt.
    pub fn rate_limited(&self, attempt: u32) -> Duration {
        self.rate_limit_base
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Linear delay after a non-success status.
    pub fn status_failure(&self, attempt: u32) -> Duration {
        self.rate_limit_base.saturating_mul(attempt)
    }

    /// Linear delay after a network fault or an unreadable payload.
    pub fn network_fault(&self, attempt: u32) -> Duration {
        self.network_step.saturating_mul(attempt)
    }

    /// Delay before retrying after `error` on the given 1-based attempt.
    pub fn delay_for(&self, error: &ClientError, attempt: u32) -> Duration {
        match error {
            ClientError::RateLimited { .. } => self.rate_limited(attempt),
            ClientError::UnexpectedStatus { .. } => self.status_failure(attempt),
            ClientError::Network { .. }
            | ClientError::MalformedPayload { .. }
            | ClientError::InvalidConfig(_)
            | ClientError::HttpClient(_) => self.network_fault(attempt),
        }
    }
}

impl From<&FetchConfig> for BackoffPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self::new(config.rate_limit_backoff(), config.network_backoff())
    }
}
