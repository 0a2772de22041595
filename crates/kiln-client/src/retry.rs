//! Fixed-delay retry policy for fallible operations.
//!
//! [`RetryPolicy`] wraps an arbitrary async operation and re-invokes it on
//! failure, sleeping a fixed duration between attempts. It holds no state
//! between invocations; every `run` starts a fresh attempt count.

use crate::error::{ClientError, ClientResult};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default number of total attempts (first attempt + retries).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
/// Default wait between attempts.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

/// Retry policy: total attempt budget and the delay between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS, wait: DEFAULT_WAIT }
    }
}

impl RetryPolicy {
    /// Create a retry policy.
    ///
    /// `max_attempts` counts the first attempt, so `1` means no retries.
    /// Both parameters are validated here, at construction, not at call
    /// time: a zero attempt budget or a zero wait is a configuration error.
    pub fn new(max_attempts: u32, wait: Duration) -> ClientResult<Self> {
        if max_attempts == 0 {
            return Err(ClientError::Config("max_attempts must be at least 1".to_string()));
        }
        if wait.is_zero() {
            return Err(ClientError::Config("wait must be greater than zero".to_string()));
        }
        Ok(Self { max_attempts, wait })
    }

    /// Total attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay between attempts.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Invoke `op` until it succeeds or the attempt budget is exhausted.
    ///
    /// A first-attempt success returns immediately, with no delay. On
    /// failure the task sleeps the configured wait and re-invokes; nothing
    /// runs concurrently with the sleep from this caller's point of view.
    /// When the final attempt fails, that failure is returned as-is;
    /// earlier failures are discarded, so the surfaced message is always
    /// the last one.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> ClientResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "attempt failed, retrying after wait"
                    );
                    tokio::time::sleep(self.wait).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
