//! Bounded retry for mutating calls.
//!
//! Only errors that [`ForemanError::is_retryable`] accepts are retried; everything else
//! is returned from the attempt that produced it.

use crate::config::{DEFAULT_BACKOFF_MSEC, DEFAULT_MAX_BACKOFF_MSEC};
use crate::error::{ForemanError, Result};
use std::time::Duration;

/// Exponential delay between attempts: `initial`, `2 * initial`, ... capped at `max`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Backoff {
        Backoff { initial, max }
    }

    /// Retry immediately.
    pub fn none() -> Backoff {
        Backoff::new(Duration::ZERO, Duration::ZERO)
    }

    /// Delay after the `failures`-th failed attempt (1-based).
    pub fn delay(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(16);
        self.initial.saturating_mul(1u32 << exponent).min(self.max)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::new(
            Duration::from_millis(DEFAULT_BACKOFF_MSEC),
            Duration::from_millis(DEFAULT_MAX_BACKOFF_MSEC),
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Never below 1.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Backoff) -> RetryPolicy {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// A single attempt.
    pub fn once() -> RetryPolicy {
        RetryPolicy::new(1, Backoff::none())
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the budget is
    /// spent. `op` receives the 1-based attempt number.
    pub fn run<T, F>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Result<T>,
    {
        let mut attempt = 1;
        loop {
            log::debug!("{label}: attempt #{attempt}/{}", self.max_attempts);
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.backoff.delay(attempt);
                    log::warn!("{label}: attempt #{attempt} failed: {e} - retry in {delay:?}");
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    attempt += 1;
                }
                Err(e) => {
                    log_give_up(label, attempt, &e);
                    return Err(e);
                }
            }
        }
    }
}

fn log_give_up(label: &str, attempt: u32, e: &ForemanError) {
    if e.is_retryable() {
        log::warn!("{label}: giving up after {attempt} attempt(s): {e}");
    } else {
        log::debug!("{label}: not retrying {e}");
    }
}
