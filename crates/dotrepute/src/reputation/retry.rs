//! Retry-with-backoff and per-attempt deadline shared by every upstream AI call.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Raised when an operation outlives its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request timed out after {}s", .after.as_secs())]
pub struct DeadlineExceeded {
    pub after: Duration,
}

/// Runs `operation` to completion or fails with [`DeadlineExceeded`],
/// whichever comes first. The losing side is dropped.
pub async fn with_deadline<T, E, Fut>(deadline: Duration, operation: Fut) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: From<DeadlineExceeded>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(DeadlineExceeded { after: deadline }.into()),
    }
}

/// Bounded attempts with a fixed delay schedule indexed by attempt number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delays: Vec<Duration>,
    attempt_timeout: Duration,
}

impl RetryPolicy {
    /// `delays[n]` is slept after failed attempt `n` (0-based). Attempts past
    /// the end of the list reuse its last entry.
    pub fn new(max_attempts: u32, delays: Vec<Duration>, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delays,
            attempt_timeout,
        }
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.delays
            .get(attempt as usize)
            .or_else(|| self.delays.last())
            .copied()
            .unwrap_or_default()
    }

    /// Runs `operation` until it succeeds, fails with an error `retryable`
    /// rejects, or the attempt budget is spent. Each attempt is bounded by the
    /// per-attempt deadline. The closure receives the 0-based attempt number.
    pub async fn execute<T, E, F, Fut, P>(&self, mut operation: F, retryable: P) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: From<DeadlineExceeded> + std::fmt::Display,
    {
        let mut attempt = 0;
        loop {
            let error = match with_deadline(self.attempt_timeout, operation(attempt)).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            let last_attempt = attempt + 1 >= self.max_attempts;
            if last_attempt || !retryable(&error) {
                return Err(error);
            }

            let delay = self.delay_after(attempt);
            warn!(
                attempt = attempt + 1,
                max_attempts = self.max_attempts,
                delay_ms = delay.as_millis() as u64,
                %error,
                "upstream call failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    /// Two attempts, 1 s then 2 s between attempts, 60 s per attempt.
    fn default() -> Self {
        Self::new(
            2,
            vec![Duration::from_secs(1), Duration::from_secs(2)],
            Duration::from_secs(60),
        )
    }
}
