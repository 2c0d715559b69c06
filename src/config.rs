use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GeneratorError, Result};
use crate::node::{EnvNodeId, NodeIdentity};

const DEFAULT_POLL_INTERVAL_MICROS: u64 = 50;
const DEFAULT_MAX_REGRESSION_WAIT_MS: u64 = 5;

/// What to do when the clock reports a bucket behind the last issued one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum RegressionPolicy {
    /// Fail the call with [`GeneratorError::ClockRegression`].
    Reject,
    /// Poll until the clock is back at the last bucket, as long as it is at most
    /// `max_wait_ms` behind. Larger regressions are rejected.
    Wait {
        #[serde(default = "default_max_regression_wait_ms")]
        max_wait_ms: u64,
    },
}

fn default_max_regression_wait_ms() -> u64 {
    DEFAULT_MAX_REGRESSION_WAIT_MS
}

impl Default for RegressionPolicy {
    fn default() -> Self {
        RegressionPolicy::Wait {
            max_wait_ms: DEFAULT_MAX_REGRESSION_WAIT_MS,
        }
    }
}

/// Runtime knobs of an [`IdGenerator`](crate::IdGenerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Milliseconds since the Unix epoch that map to timestamp 0.
    pub epoch_millis: u64,
    /// Sleep between clock reads while waiting for a bucket to pass.
    /// Zero yields the thread instead of sleeping.
    pub poll_interval: Duration,
    pub regression: RegressionPolicy,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            epoch_millis: 0,
            poll_interval: Duration::from_micros(DEFAULT_POLL_INTERVAL_MICROS),
            regression: RegressionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub node_id: Option<u32>,
    /// Environment variable holding the node id, used when `node_id` is absent.
    pub node_id_env: Option<String>,
    pub epoch_millis: u64,
    pub poll_interval_micros: u64,
    pub regression: RegressionPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            node_id: None,
            node_id_env: None,
            epoch_millis: 0,
            poll_interval_micros: DEFAULT_POLL_INTERVAL_MICROS,
            regression: RegressionPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GeneratorError::Configuration(format!(
                "config file {} not found",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolves the node id: an explicit `node_id` wins over `node_id_env`.
    pub fn resolve_node_id(&self) -> Result<u32> {
        match (&self.node_id, &self.node_id_env) {
            (Some(node_id), _) => Ok(*node_id),
            (None, Some(var)) => EnvNodeId::new(var.as_str()).node_id(),
            (None, None) => Err(GeneratorError::Configuration(
                "no node id configured: set node_id or node_id_env".to_string(),
            )),
        }
    }

    pub fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            epoch_millis: self.epoch_millis,
            poll_interval: Duration::from_micros(self.poll_interval_micros),
            regression: self.regression,
        }
    }
}
