// Fixed-interval retry budget shared by every retrying monitor operation.

use std::time::Duration;

use crate::config::RetryPolicy;

/// Countdown of retries left under a [`RetryPolicy`].
///
/// ```ignore
/// let mut backoff = Backoff::new(policy);
/// loop {
///     if attempt().await { break true; }
///     if !backoff.wait().await { break false; }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Backoff {
    interval: Duration,
    remaining: u32,
}

impl Backoff {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            interval: policy.interval,
            remaining: policy.max_retries,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Spend one retry and sleep for the interval.
    ///
    /// Returns `false` immediately, without sleeping, once the budget is
    /// spent. A zero interval never yields to the timer.
    pub async fn wait(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
        true
    }
}
