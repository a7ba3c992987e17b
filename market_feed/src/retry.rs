//! Backoff policy for transient fetch failures.
//!
//! The policy is a pure function of (attempt number, error kind) so it can
//! be unit-tested without timers; the actual sleeping happens in the
//! provider's fetch loop.

use std::time::Duration;

use crate::errors::FetchError;

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// Wait this long, then try again.
    RetryAfter(Duration),
    /// Surface the error to the caller.
    GiveUp,
}

/// Exponential backoff with a fixed attempt budget.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts allowed, including the first one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles each retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Decide what to do after `attempt` (1-based) failed with `error`.
    ///
    /// Non-retryable errors and exhausted budgets give up; otherwise the
    /// delay is `base_delay * 2^(attempt - 1)`, so every retry waits
    /// strictly longer than the previous one.
    pub fn decide(&self, attempt: u32, error: &FetchError) -> RetryAction {
        if !error.is_retryable() || attempt >= self.max_attempts {
            return RetryAction::GiveUp;
        }
        RetryAction::RetryAfter(self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}
