//! Retry utilities with exponential backoff for resilient API calls.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::sources::SourceError;

/// Configuration for retry behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Delay to wait after the given failed attempt (1-based).
    ///
    /// Multipliers below 1.0 (or NaN) are treated as 1.0; the result never exceeds `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self
            .backoff_multiplier
            .max(1.0)
            .powi(attempt.saturating_sub(1).min(i32::MAX as u32) as i32);
        let secs = self.initial_delay.as_secs_f64() * exp;
        Duration::try_from_secs_f64(secs.min(self.max_delay.as_secs_f64())).unwrap_or(self.max_delay)
    }
}

/// Execute an async operation, retrying transient failures with backoff.
///
/// Permanent errors (see [`SourceError::is_transient`]) return immediately; the last
/// transient error is returned once `max_attempts` is reached.
pub async fn with_retry<T, F, Fut>(config: RetryConfig, mut operation: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!("Operation succeeded on attempt {}", attempt);
                }
                return Ok(result);
            }
            Err(error) if error.is_transient() && attempt < config.max_attempts => {
                let delay = config.delay_for(attempt);
                tracing::debug!(
                    "Transient error on attempt {}: {}, retrying in {:?}",
                    attempt,
                    error,
                    delay
                );
                sleep(delay).await;
            }
            Err(error) => {
                if error.is_transient() {
                    tracing::warn!("Operation failed after {} attempts: {}", attempt, error);
                }
                return Err(error);
            }
        }
    }
}
