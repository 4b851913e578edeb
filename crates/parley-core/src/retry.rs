//! Bounded retry with backoff.
//!
//! A stateless policy (`RetryPolicy`) plus one driver function
//! (`retry_with_backoff`). The action receives the 1-based attempt number;
//! the driver sleeps between attempts and never after the last one.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Attempt bound used for NLU client startup.
pub const STARTUP_MAX_ATTEMPTS: u32 = 3;

/// Delay between NLU client startup attempts.
pub const STARTUP_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Delay schedule between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay after every failed attempt.
    Fixed(Duration),
    /// `initial * factor^(attempt - 1)`, capped at `max`.
    Exponential {
        initial: Duration,
        factor: u32,
        max: Duration,
    },
}

impl Backoff {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential {
                initial,
                factor,
                max,
            } => {
                let exponent = attempt.saturating_sub(1);
                let multiplier = factor.checked_pow(exponent).unwrap_or(u32::MAX);
                initial.saturating_mul(multiplier).min(max)
            }
        }
    }
}

/// Attempt limit plus backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Policy with a fixed delay between attempts.
    pub const fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fixed(delay),
        }
    }

    /// The policy used for NLU client startup: 3 attempts, 1 second apart.
    pub const fn startup() -> Self {
        Self::fixed(STARTUP_MAX_ATTEMPTS, STARTUP_RETRY_DELAY)
    }

    /// Whether another attempt follows the given failed attempt (1-based).
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.effective_max()
    }

    fn effective_max(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::startup()
    }
}

/// Every attempt failed; carries the error from the final one.
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

impl<E> RetryExhausted<E> {
    pub fn into_inner(self) -> E {
        self.last_error
    }
}

impl<E: fmt::Display> fmt::Display for RetryExhausted<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gave up after {} attempt(s): {}",
            self.attempts, self.last_error
        )
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for RetryExhausted<E> {}

/// Run `action` until it succeeds or the policy's attempt bound is reached.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut action: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match action(attempt).await {
            Ok(value) => return Ok(value),
            Err(_) if policy.should_retry(attempt) => {
                let delay = policy.backoff.delay_after(attempt);
                debug!(
                    attempt,
                    max_attempts = policy.effective_max(),
                    delay_ms = delay.as_millis() as u64,
                    "attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                return Err(RetryExhausted {
                    attempts: attempt,
                    last_error: error,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_startup_policy_constants() {
        let policy = RetryPolicy::startup();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff, Backoff::Fixed(Duration::from_secs(1)));
        assert_eq!(policy, RetryPolicy::default());
    }

    #[test]
    fn test_should_retry_within_limit() {
        let policy = RetryPolicy::fixed(3, Duration::ZERO);
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }

    #[test]
    fn test_zero_attempts_treated_as_one() {
        let policy = RetryPolicy::fixed(0, Duration::ZERO);
        assert!(!policy.should_retry(1));
    }

    #[test]
    fn test_exponential_backoff_caps() {
        let backoff = Backoff::Exponential {
            initial: Duration::from_millis(100),
            factor: 2,
            max: Duration::from_millis(500),
        };
        assert_eq!(backoff.delay_after(1), Duration::from_millis(100));
        assert_eq!(backoff.delay_after(2), Duration::from_millis(200));
        assert_eq!(backoff.delay_after(3), Duration::from_millis(400));
        assert_eq!(backoff.delay_after(4), Duration::from_millis(500));
        assert_eq!(backoff.delay_after(60), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_succeeds_on_later_attempt() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::fixed(3, Duration::ZERO);

        let result: Result<u32, RetryExhausted<String>> = retry_with_backoff(&policy, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(format!("fail {attempt}"))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::fixed(3, Duration::ZERO);

        let result: Result<(), _> = retry_with_backoff(&policy, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err::<(), _>(format!("fail {attempt}")) }
        })
        .await;

        let exhausted = result.unwrap_err();
        assert_eq!(exhausted.attempts, 3);
        assert_eq!(exhausted.last_error, "fail 3");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(exhausted.to_string(), "gave up after 3 attempt(s): fail 3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_between_attempts_but_not_after_last() {
        let policy = RetryPolicy::startup();
        let start = tokio::time::Instant::now();

        let result: Result<(), _> =
            retry_with_backoff(&policy, |_| async { Err::<(), _>("down") }).await;

        assert!(result.is_err());
        // Two gaps of 1s between three attempts.
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_does_not_sleep() {
        let policy = RetryPolicy::startup();
        let start = tokio::time::Instant::now();

        let result = retry_with_backoff(&policy, |_| async { Ok::<_, String>("up") }).await;

        assert_eq!(result.unwrap(), "up");
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
