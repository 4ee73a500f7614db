use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Backoff schedule for establishing the MongoDB connection at startup.
///
/// Only connection establishment retries. Queries never do: a failed catalog
/// query fails its request.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    /// Upper bound for any single wait
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    /// Scale each wait by a factor in `[0.5, 1.0)`
    pub use_jitter: bool,
}

impl RetryConfig {
    /// 3 retries, 100ms doubling up to 5s, with jitter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Un-jittered wait before retry number `retry` (1-based).
    pub fn delay_before(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(1024) as i32;
        let factor = self.backoff_multiplier.max(1.0).powi(exponent);
        let scaled = self.initial_delay.as_secs_f64() * factor;

        if scaled.is_finite() && scaled < self.max_delay.as_secs_f64() {
            Duration::from_secs_f64(scaled)
        } else {
            self.max_delay
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Run `operation` until it succeeds or `config.max_retries` retries fail.
///
/// The last error is returned unchanged.
///
/// # Example
/// ```ignore
/// use database::common::retry::{retry_with_backoff, RetryConfig};
///
/// let client = retry_with_backoff(
///     || database::mongodb::connect(&mongo_url),
///     RetryConfig::new().with_max_retries(10),
/// )
/// .await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retries = 0;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    info!(retries, "Connected after retrying");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if retries >= config.max_retries {
            warn!(attempts = retries + 1, "Giving up: {}", error);
            return Err(error);
        }
        retries += 1;

        let mut delay = config.delay_before(retries);
        if config.use_jitter {
            delay = jitter(delay);
        }

        warn!(
            retry = retries,
            max_retries = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            "Attempt failed: {}",
            error
        );
        tokio::time::sleep(delay).await;
    }
}

/// [`retry_with_backoff`] with [`RetryConfig::default`]
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

fn jitter(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let percent = RandomState::new().hash_one(std::time::SystemTime::now()) % 50 + 50;
    delay.mul_f64(percent as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryConfig {
        RetryConfig::new()
            .with_initial_delay(Duration::from_millis(5))
            .without_jitter()
    }

    #[test]
    fn test_delay_schedule_doubles_then_caps() {
        let config = RetryConfig::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(500));

        let delays: Vec<u128> = (1..=5).map(|r| config.delay_before(r).as_millis()).collect();
        assert_eq!(delays, [100, 200, 400, 500, 500]);
    }

    #[test]
    fn test_delay_never_shrinks_below_initial() {
        let config = RetryConfig::new().with_backoff_multiplier(0.5);
        assert_eq!(config.delay_before(4), config.initial_delay);
    }

    #[test]
    fn test_delay_huge_exponent_is_capped() {
        let config = RetryConfig::new().with_backoff_multiplier(1e10);
        assert_eq!(config.delay_before(u32::MAX), config.max_delay);
    }

    #[test]
    fn test_jitter_stays_within_half_to_full() {
        let delay = Duration::from_millis(1000);
        for _ in 0..20 {
            let jittered = jitter(delay);
            assert!(jittered >= Duration::from_millis(500));
            assert!(jittered < delay);
        }
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_failures() {
        let attempts = Arc::new(AtomicU32::new(0));
        let seen = attempts.clone();

        let result = retry_with_backoff(
            || {
                let attempts = seen.clone();
                async move {
                    if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("server selection timeout")
                    } else {
                        Ok("client")
                    }
                }
            },
            fast(),
        )
        .await;

        assert_eq!(result, Ok("client"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_returns_last_error() {
        let attempts = Arc::new(AtomicU32::new(0));
        let seen = attempts.clone();

        let result: Result<(), String> = retry_with_backoff(
            || {
                let attempts = seen.clone();
                async move {
                    let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(format!("attempt {}", n))
                }
            },
            fast().with_max_retries(2),
        )
        .await;

        assert_eq!(result, Err("attempt 3".to_string()));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_retries_runs_once() {
        let attempts = Arc::new(AtomicU32::new(0));
        let seen = attempts.clone();

        let result: Result<(), &str> = retry_with_backoff(
            || {
                let attempts = seen.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err("refused")
                }
            },
            fast().with_max_retries(0),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
