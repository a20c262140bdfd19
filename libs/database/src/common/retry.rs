use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Startup connection backoff: the delay doubles after each failure up to `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (1-based).
    fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds or `backoff.max_retries` retries are spent.
/// The last error is returned unchanged.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, backoff: Backoff) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    info!(retries = attempt, "Connected after retrying");
                }
                return Ok(value);
            }
            Err(e) if attempt >= backoff.max_retries => {
                warn!(attempts = attempt + 1, error = %e, "Giving up");
                return Err(e);
            }
            Err(e) => {
                attempt += 1;
                let delay = backoff.delay(attempt);
                warn!(
                    attempt,
                    max_retries = backoff.max_retries,
                    retry_in_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
