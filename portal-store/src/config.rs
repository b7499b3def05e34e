//! Store configuration: latency strategy and identifier generator.

use crate::latency::{FixedLatency, Latency, NoLatency};
use portal_types::{IdGenerator, TimeRandomIdGenerator};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for an [`EntityStore`](crate::EntityStore).
///
/// Defaults to a fixed 500 ms delay and the time + random id generator.
#[derive(Clone)]
pub struct StoreConfig {
    /// Delay awaited before every asynchronous operation.
    pub latency: Arc<dyn Latency>,
    /// Source of identifiers for created entities.
    pub id_generator: Arc<dyn IdGenerator>,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the latency strategy with a fixed delay.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.with_latency(FixedLatency::new(delay))
    }

    /// Disables simulated latency.
    pub fn without_latency(self) -> Self {
        self.with_latency(NoLatency)
    }

    pub fn with_latency(mut self, latency: impl Latency + 'static) -> Self {
        self.latency = Arc::new(latency);
        self
    }

    pub fn with_id_generator(mut self, generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Arc::new(generator);
        self
    }

    /// Shares one generator between several stores.
    pub fn with_shared_id_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = generator;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency: Arc::new(FixedLatency::default()),
            id_generator: Arc::new(TimeRandomIdGenerator::new()),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig").finish_non_exhaustive()
    }
}
