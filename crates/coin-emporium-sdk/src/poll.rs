//! Bounded polling.
//!
//! The node offers no push notification for finality, so callers poll
//! until a condition holds. [`PollPolicy`] bounds that loop: how many checks
//! are made, how long to sleep between them and how the sleep grows.
//!
//! # Example
//!
//! ```rust
//! use coin_emporium_sdk::poll::{Backoff, PollPolicy};
//! use std::time::Duration;
//!
//! // The default: 10 checks, one second apart.
//! let policy = PollPolicy::default();
//! assert_eq!(policy.max_attempts, 10);
//!
//! let policy = PollPolicy::builder()
//!     .max_attempts(20)
//!     .interval(Duration::from_millis(250))
//!     .backoff(Backoff::Exponential { factor: 2.0, max_interval: Duration::from_secs(4) })
//!     .build();
//! assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(1));
//! ```

use crate::error::EmporiumResult;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// How the sleep between two checks evolves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Always sleep for the base interval.
    Fixed,
    /// Multiply the interval by `factor` after every check, up to `max_interval`.
    Exponential {
        /// Growth factor per attempt.
        factor: f64,
        /// Upper bound on a single sleep.
        max_interval: Duration,
    },
}

/// Configuration for a bounded poll loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    /// Maximum number of checks (at least one check is always made).
    pub max_attempts: u32,
    /// Sleep after the first unsuccessful check.
    pub interval: Duration,
    /// How the sleep grows between checks.
    pub backoff: Backoff,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_secs(1),
            backoff: Backoff::Fixed,
        }
    }
}

impl PollPolicy {
    /// Creates a new builder for PollPolicy.
    pub fn builder() -> PollPolicyBuilder {
        PollPolicyBuilder::default()
    }

    /// Fixed-interval policy.
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            backoff: Backoff::Fixed,
        }
    }

    /// Returns the sleep that follows the given (1-based) unsuccessful check.
    #[allow(clippy::cast_possible_truncation)]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential {
                factor,
                max_interval,
            } => {
                let exp = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
                let millis = self.interval.as_millis() as f64 * factor.powi(exp);
                let capped = millis.min(max_interval.as_millis() as f64).max(0.0);
                Duration::from_millis(capped as u64)
            }
        }
    }

    /// Runs `check` until it returns `true` or the attempt budget is spent.
    ///
    /// Returns `Ok(true)` when the condition was met and `Ok(false)` when every
    /// attempt came back negative. No sleep follows the final check. Errors
    /// returned by `check` abort the loop immediately.
    pub async fn poll<F, Fut>(&self, mut check: F) -> EmporiumResult<bool>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = EmporiumResult<bool>>,
    {
        let attempts = self.max_attempts.max(1);
        for attempt in 1..=attempts {
            if check().await? {
                return Ok(true);
            }
            if attempt < attempts {
                let delay = self.delay_for_attempt(attempt);
                if !delay.is_zero() {
                    sleep(delay).await;
                }
            }
        }
        Ok(false)
    }
}

/// Builder for PollPolicy.
#[derive(Debug, Clone, Default)]
pub struct PollPolicyBuilder {
    max_attempts: Option<u32>,
    interval: Option<Duration>,
    backoff: Option<Backoff>,
}

impl PollPolicyBuilder {
    /// Sets the maximum number of checks.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Sets the base interval between checks.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Sets the backoff strategy.
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Builds the PollPolicy.
    pub fn build(self) -> PollPolicy {
        let default = PollPolicy::default();
        PollPolicy {
            max_attempts: self.max_attempts.unwrap_or(default.max_attempts),
            interval: self.interval.unwrap_or(default.interval),
            backoff: self.backoff.unwrap_or(default.backoff),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmporiumError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast(max_attempts: u32) -> PollPolicy {
        PollPolicy::fixed(max_attempts, Duration::from_millis(1))
    }

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.interval, Duration::from_secs(1));
        assert_eq!(policy.backoff, Backoff::Fixed);
    }

    #[test]
    fn test_builder() {
        let policy = PollPolicy::builder()
            .max_attempts(3)
            .interval(Duration::from_millis(50))
            .build();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.interval, Duration::from_millis(50));
        assert_eq!(policy.backoff, Backoff::Fixed);
    }

    #[test]
    fn test_fixed_delay() {
        let policy = PollPolicy::fixed(5, Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(200));
    }

    #[test]
    fn test_exponential_delay_capped() {
        let policy = PollPolicy::builder()
            .interval(Duration::from_millis(100))
            .backoff(Backoff::Exponential {
                factor: 2.0,
                max_interval: Duration::from_millis(350),
            })
            .build();
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(350));
        assert_eq!(policy.delay_for_attempt(30), Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_poll_succeeds_after_some_checks() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let done = fast(10)
            .poll(|| {
                let c = c.clone();
                async move { Ok(c.fetch_add(1, Ordering::SeqCst) + 1 >= 3) }
            })
            .await
            .unwrap();
        assert!(done);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_poll_exhausts_budget() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let done = fast(10)
            .poll(|| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(false)
                }
            })
            .await
            .unwrap();
        assert!(!done);
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_poll_zero_attempts_still_checks_once() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let done = fast(0)
            .poll(|| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(false)
                }
            })
            .await
            .unwrap();
        assert!(!done);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_poll_propagates_errors() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let result = fast(10)
            .poll(|| {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(EmporiumError::remote(500, "down"))
                }
            })
            .await;
        assert!(matches!(
            result,
            Err(EmporiumError::Remote {
                status_code: 500,
                ..
            })
        ));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
