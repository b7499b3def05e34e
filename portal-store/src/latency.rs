//! Simulated network latency strategies.
//!
//! Every store operation awaits its strategy exactly once before touching
//! the collection, so calling code exercises the same asynchronous paths it
//! would against a remote backend.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Delay applied when no strategy is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// A pluggable artificial delay.
#[async_trait]
pub trait Latency: Send + Sync {
    /// Suspends the caller for this strategy's delay.
    async fn wait(&self);
}

/// Resolves immediately. Intended for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn wait(&self) {}
}

/// The same delay for every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLatency(Duration);

impl FixedLatency {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self(delay)
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.0
    }
}

impl Default for FixedLatency {
    fn default() -> Self {
        Self(DEFAULT_DELAY)
    }
}

#[async_trait]
impl Latency for FixedLatency {
    async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// A uniformly random delay in `[min, max]`, drawn per operation.
///
/// Concurrent operations against one store may complete out of call order
/// under this strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterLatency {
    min: Duration,
    max: Duration,
}

impl JitterLatency {
    /// Bounds are swapped if given in the wrong order.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[must_use]
    pub const fn min(&self) -> Duration {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Duration {
        self.max
    }

    /// Draws one delay from the configured range.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

#[async_trait]
impl Latency for JitterLatency {
    async fn wait(&self) {
        let delay = self.sample();
        tokio::time::sleep(delay).await;
    }
}
