//! Retry with Bounded Exponential Backoff
//!
//! Wraps calls to a backing store so that transient connection loss is
//! absorbed by a few spaced retries, while persistent failure is surfaced
//! quickly instead of retried forever. Every attempt also runs under a
//! timeout, so a hung backend cannot hang the caller.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, timeout};

/// Retry policy
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_backoff: Duration,
    /// Ceiling for any single delay
    pub max_backoff: Duration,
    /// Upper bound on a single attempt
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(3),
            attempt_timeout: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given failed attempt (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }
}

/// Outcome of a retried operation that did not succeed
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The error was not worth retrying
    #[error("{0}")]
    Permanent(E),

    /// Every attempt failed transiently; carries the last error
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },

    /// The final attempt exceeded its timeout
    #[error("gave up after {attempts} attempts: timed out after {timeout:?}")]
    TimedOut { attempts: u32, timeout: Duration },
}

/// Run `operation` under `policy`.
///
/// `is_transient` decides whether an error is retried. Attempt timeouts are
/// always treated as transient.
pub async fn retry<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    operation_name: &str,
    is_transient: P,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        let failure = match timeout(policy.attempt_timeout, operation()).await {
            Ok(Ok(value)) => {
                if attempt > 1 {
                    tracing::info!(
                        operation = operation_name,
                        attempt,
                        "Operation succeeded after retry"
                    );
                }
                return Ok(value);
            }
            Ok(Err(e)) if !is_transient(&e) => return Err(RetryError::Permanent(e)),
            Ok(Err(e)) => {
                if attempt >= max_attempts {
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                e.to_string()
            }
            Err(_) => {
                if attempt >= max_attempts {
                    return Err(RetryError::TimedOut {
                        attempts: attempt,
                        timeout: policy.attempt_timeout,
                    });
                }
                format!("timed out after {:?}", policy.attempt_timeout)
            }
        };

        let delay = policy.backoff_for(attempt);
        tracing::warn!(
            operation = operation_name,
            attempt,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %failure,
            "Operation failed, retrying"
        );
        sleep(delay).await;
    }
}
