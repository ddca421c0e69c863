//! Retry logic.
//!
//! # Responsibilities
//! - Pace every attempt with a fixed courtesy delay
//! - Retry unsuccessful answers with a fixed backoff, up to a bounded count
//! - Hand the last answer back when attempts run out, so the caller decides
//!   what an exhausted request means
//!
//! # Design Decisions
//! - Only *answers* are retried. An `Err` from the operation ends the loop
//!   immediately and is propagated.
//! - Delays are fixed, not exponential: the provider's rate limit window is
//!   short and constant.

use std::future::Future;
use std::time::Duration;

use crate::config::schema::RetryConfig;

/// Result of running an operation under a [`RetryPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    /// An attempt produced an accepted answer.
    Success { value: T, attempts: u32 },
    /// Every attempt produced a rejected answer; `last` is the final one.
    Exhausted { last: T, attempts: u32 },
}

impl<T> RetryOutcome<T> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Success { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Bounded, fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    pre_request_delay: Duration,
    retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, pre_request_delay: Duration, retry_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            pre_request_delay,
            retry_delay,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.pre_request_delay(),
            config.retry_delay(),
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `attempt` until `accept` approves an answer or attempts run out.
    ///
    /// `on_retry` sees each rejected answer that will be followed by another
    /// attempt, together with the 1-based number of the attempt that produced
    /// it. It is not called for the final rejected answer.
    pub async fn run<T, E, F, Fut, A, R>(
        &self,
        mut attempt: F,
        accept: A,
        mut on_retry: R,
    ) -> Result<RetryOutcome<T>, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        A: Fn(&T) -> bool,
        R: FnMut(&T, u32),
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            tokio::time::sleep(self.pre_request_delay).await;

            let answer = attempt(attempts).await?;
            if accept(&answer) {
                return Ok(RetryOutcome::Success {
                    value: answer,
                    attempts,
                });
            }
            if attempts >= self.max_attempts {
                return Ok(RetryOutcome::Exhausted {
                    last: answer,
                    attempts,
                });
            }

            on_retry(&answer, attempts);
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn instant(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    #[test]
    fn test_default_policy_matches_config() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.pre_request_delay, Duration::from_millis(300));
        assert_eq!(policy.retry_delay, Duration::from_millis(3000));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        assert_eq!(instant(0).max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt() {
        let mut retried = Vec::new();
        let outcome = instant(3)
            .run(
                |n| async move { Ok::<u16, Infallible>(if n < 3 { 500 } else { 200 }) },
                |status: &u16| *status == 200,
                |status: &u16, n: u32| retried.push((*status, n)),
            )
            .await
            .unwrap();

        assert_eq!(outcome, RetryOutcome::Success { value: 200, attempts: 3 });
        assert_eq!(retried, vec![(500, 1), (500, 2)]);
    }

    #[tokio::test]
    async fn test_exhausted_returns_last_answer() {
        let mut retries = 0;
        let outcome = instant(3)
            .run(
                |n| async move { Ok::<u32, Infallible>(500 + n) },
                |status: &u32| *status == 200,
                |_: &u32, _: u32| retries += 1,
            )
            .await
            .unwrap();

        assert_eq!(outcome, RetryOutcome::Exhausted { last: 503, attempts: 3 });
        assert_eq!(outcome.attempts(), 3);
        // The final rejection is not announced as a retry.
        assert_eq!(retries, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_policy_paces_attempts() {
        let start = tokio::time::Instant::now();
        let outcome = RetryPolicy::default()
            .run(
                |n| async move { Ok::<u16, Infallible>(if n < 3 { 500 } else { 200 }) },
                |status: &u16| *status == 200,
                |_: &u16, _: u32| {},
            )
            .await
            .unwrap();

        assert_eq!(outcome.attempts(), 3);
        // Three courtesy delays and two backoffs.
        assert_eq!(start.elapsed(), Duration::from_millis(3 * 300 + 2 * 3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success_waits_only_courtesy_delay() {
        let start = tokio::time::Instant::now();
        let outcome = RetryPolicy::default()
            .run(
                |_| async { Ok::<u16, Infallible>(200) },
                |status: &u16| *status == 200,
                |_: &u16, _: u32| {},
            )
            .await
            .unwrap();

        assert_eq!(outcome, RetryOutcome::Success { value: 200, attempts: 1 });
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_skips_backoff_after_last_attempt() {
        let start = tokio::time::Instant::now();
        RetryPolicy::default()
            .run(
                |_| async { Ok::<u16, Infallible>(500) },
                |status: &u16| *status == 200,
                |_: &u16, _: u32| {},
            )
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(3 * 300 + 2 * 3000));
    }

    #[tokio::test]
    async fn test_error_stops_immediately() {
        let mut calls = 0;
        let result: Result<RetryOutcome<u16>, &str> = instant(3)
            .run(
                |_| {
                    calls += 1;
                    async { Err("connection refused") }
                },
                |_: &u16| true,
                |_: &u16, _: u32| {},
            )
            .await;

        assert_eq!(result.unwrap_err(), "connection refused");
        assert_eq!(calls, 1);
    }
}
