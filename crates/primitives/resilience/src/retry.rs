//! Fixed-interval retry strategy for proof submission campaigns.
//!
//! Submission slots are contested by independent provers, so campaigns retry on a
//! constant cadence rather than an exponential one. There is no attempt cap: a
//! campaign runs until it reaches a terminal outcome or its [`CancellationToken`]
//! is cancelled.
use std::time::Duration;

use tokio_util::sync::CancellationToken;

// Use tokio::time::Instant for tests (allows time manipulation)
// Use std::time::Instant for production (more efficient)
#[cfg(not(test))]
type InstantProvider = std::time::Instant;

#[cfg(test)]
type InstantProvider = tokio::time::Instant;

/// Configuration for the fixed-interval retry strategy
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Constant delay between two ticks
    pub interval: Duration,
    /// Interval for logging warnings during retries
    pub log_interval: Duration,
}

impl RetryConfig {
    pub fn with_interval(interval: Duration) -> Self {
        Self { interval, ..Default::default() }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(12),     // one L1 slot
            log_interval: Duration::from_secs(60), // Log every minute
        }
    }
}

/// State tracker for retry attempts
pub struct RetryState {
    config: RetryConfig,
    start_time: InstantProvider,
    last_log_time: Option<InstantProvider>,
    retry_count: usize,
}

impl std::fmt::Debug for RetryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryState")
            .field("config", &self.config)
            .field("retry_count", &self.retry_count)
            .finish()
    }
}

impl RetryState {
    pub fn new(config: RetryConfig) -> Self {
        Self { config, start_time: InstantProvider::now(), last_log_time: None, retry_count: 0 }
    }

    /// Delay before the next tick. Constant by construction.
    pub fn next_delay(&self) -> Duration {
        self.config.interval
    }

    /// Sleeps for [`Self::next_delay`], returning `false` if `cancellation` fired first.
    pub async fn wait_next_tick(&self, cancellation: &CancellationToken) -> bool {
        tokio::select! {
            _ = cancellation.cancelled() => false,
            _ = tokio::time::sleep(self.next_delay()) => true,
        }
    }

    /// Check if we should log this retry attempt (throttled logging)
    pub fn should_log(&mut self) -> bool {
        match self.last_log_time {
            None => {
                self.last_log_time = Some(InstantProvider::now());
                true
            }
            Some(last) => {
                if last.elapsed() >= self.config.log_interval {
                    self.last_log_time = Some(InstantProvider::now());
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Increment retry counter and return current count
    pub fn increment_retry(&mut self) -> usize {
        self.retry_count += 1;
        self.retry_count
    }

    /// Get current retry count
    pub fn get_retry_count(&self) -> usize {
        self.retry_count
    }

    /// Get elapsed time since the campaign started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}
