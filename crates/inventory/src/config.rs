//! Configuration types for inventory retrieval.

use std::time::Duration;

/// Complete inventory configuration: snapshot freshness + retry settings.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// How long a fetched snapshot is served before the source is asked again.
    pub freshness: Duration,
    /// Retry settings for transient fetch failures.
    pub retry: RetryConfig,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            freshness: Duration::from_secs(5 * 60),
            retry: RetryConfig::default(),
        }
    }
}

impl InventoryConfig {
    /// Override the freshness window (builder pattern).
    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Override the retry settings (builder pattern).
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Retry settings for transient fetch failures.
///
/// Uses exponential backoff capped at `max_delay`. Only errors where
/// `InventoryError::is_retryable()` returns `true` are retried.
///
/// The default makes two attempts: the initial fetch plus one retry.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial attempt).
    pub max_attempts: u32,
    /// Initial delay between retries.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Retry settings with the given attempt count and no delay between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Backoff delay before the retry that follows `attempt` (0-indexed).
    ///
    /// delay = min(initial_delay * 2^attempt, max_delay)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }
}
