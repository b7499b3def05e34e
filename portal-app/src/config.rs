use anyhow::{Context, Result};
use portal_store::StoreConfig;
use portal_types::IdStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings shared by every store in a [`Portal`](crate::Portal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Simulated latency per operation, in milliseconds. Zero disables it.
    pub delay_ms: u64,
    pub id_strategy: IdStrategy,
    /// Load the bundled fixtures on startup.
    pub seed: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            delay_ms: 500,
            id_strategy: IdStrategy::default(),
            seed: true,
        }
    }
}

impl PortalConfig {
    /// Reads a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Store settings for one domain store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new()
            .with_delay(self.delay())
            .with_shared_id_generator(self.id_strategy.generator())
    }
}
