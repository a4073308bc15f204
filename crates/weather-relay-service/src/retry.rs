//! Fixed-delay retry around single-attempt delivery.

use crate::api_client::{DeliveryError, ReadingSink};
use std::time::Duration;
use tracing::{info, warn};
use weather_relay_core::Reading;

/// Bounded retry with a fixed pause between attempts.
///
/// Deliberately uniform: there is no backoff growth, no jitter, and no
/// distinction between error kinds — a 4xx rejection and a transport timeout
/// are retried identically. Injected at construction so tests can use small
/// values.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total delivery attempts, including the first.
    pub max_attempts: u32,
    /// Pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// Attempt delivery up to `policy.max_attempts` times, pausing `policy.delay`
/// between failures and stopping on the first success.
///
/// At least one attempt is always made. On exhaustion only the final
/// attempt's error is returned; earlier failures are logged at WARN.
pub async fn deliver_with_retry(
    sink: &dyn ReadingSink,
    reading: &Reading,
    policy: &RetryPolicy,
) -> Result<(), DeliveryError> {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        match sink.deliver(reading).await {
            Ok(()) => {
                if attempt > 1 {
                    info!(
                        attempt,
                        location = %reading.location,
                        "delivery succeeded after retry"
                    );
                }
                return Ok(());
            }
            Err(error) if attempt < policy.max_attempts => {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %error,
                    "delivery attempt failed, pausing before retry"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(error) => {
                warn!(
                    attempts = attempt,
                    error = %error,
                    "delivery attempts exhausted"
                );
                return Err(error);
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
