use crate::error::{GeneratorError, Result};

/// Default environment variable consulted by [`EnvNodeId`].
pub const DEFAULT_NODE_ID_VAR: &str = "NODE_ID";

pub trait NodeIdentity {
    fn node_id(&self) -> Result<u32>;
}

impl NodeIdentity for u16 {
    fn node_id(&self) -> Result<u32> {
        Ok(u32::from(*self))
    }
}

impl NodeIdentity for u32 {
    fn node_id(&self) -> Result<u32> {
        Ok(*self)
    }
}

/// Reads the node id from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvNodeId {
    var: String,
}

impl EnvNodeId {
    pub fn new(var: impl Into<String>) -> Self {
        EnvNodeId { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvNodeId {
    fn default() -> Self {
        EnvNodeId::new(DEFAULT_NODE_ID_VAR)
    }
}

impl NodeIdentity for EnvNodeId {
    fn node_id(&self) -> Result<u32> {
        let raw = std::env::var(&self.var).map_err(|err| {
            GeneratorError::Configuration(format!("node id variable {}: {}", self.var, err))
        })?;

        raw.trim().parse::<u32>().map_err(|err| {
            GeneratorError::Configuration(format!(
                "node id variable {} is not a number ({:?}): {}",
                self.var, raw, err
            ))
        })
    }
}
