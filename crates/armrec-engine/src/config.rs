//! Engine timing configuration.
//!
//! All knobs deserialize from the host's structured config with per-field
//! defaults, so a partial map like `{"lro_timeout_secs": 600}` is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout and backoff knobs for the mutator's suspension points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound for driving one long-running operation.
    #[serde(default = "default_lro_timeout_secs")]
    pub lro_timeout_secs: u64,

    /// First LRO poll delay; doubles per poll.
    #[serde(default = "default_poll_floor_secs")]
    pub poll_floor_secs: u64,

    /// Ceiling for the exponential poll delay.
    #[serde(default = "default_poll_ceiling_secs")]
    pub poll_ceiling_secs: u64,

    /// Fixed cadence of the post-delete settle reads.
    #[serde(default = "default_settle_interval_secs")]
    pub settle_interval_secs: u64,

    /// Upper bound for the post-delete settle loop.
    #[serde(default = "default_settle_max_wait_secs")]
    pub settle_max_wait_secs: u64,
}

fn default_lro_timeout_secs() -> u64 {
    1800
}

fn default_poll_floor_secs() -> u64 {
    2
}

fn default_poll_ceiling_secs() -> u64 {
    30
}

fn default_settle_interval_secs() -> u64 {
    20
}

fn default_settle_max_wait_secs() -> u64 {
    600
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lro_timeout_secs: default_lro_timeout_secs(),
            poll_floor_secs: default_poll_floor_secs(),
            poll_ceiling_secs: default_poll_ceiling_secs(),
            settle_interval_secs: default_settle_interval_secs(),
            settle_max_wait_secs: default_settle_max_wait_secs(),
        }
    }
}

impl EngineConfig {
    pub fn lro_timeout(&self) -> Duration {
        Duration::from_secs(self.lro_timeout_secs)
    }

    pub fn poll_floor(&self) -> Duration {
        Duration::from_secs(self.poll_floor_secs)
    }

    pub fn poll_ceiling(&self) -> Duration {
        Duration::from_secs(self.poll_ceiling_secs)
    }

    pub fn settle_interval(&self) -> Duration {
        Duration::from_secs(self.settle_interval_secs)
    }

    pub fn settle_max_wait(&self) -> Duration {
        Duration::from_secs(self.settle_max_wait_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: EngineConfig = serde_json::from_value(serde_json::json!({
            "lro_timeout_secs": 600
        }))
        .unwrap();
        assert_eq!(cfg.lro_timeout(), Duration::from_secs(600));
        assert_eq!(cfg.settle_interval(), Duration::from_secs(20));
        assert_eq!(cfg.settle_max_wait(), Duration::from_secs(600));
    }
}
