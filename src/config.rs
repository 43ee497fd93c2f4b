//! Configuration for nskv
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for an engine handle and the registry built on it
#[derive(Debug, Clone, Default)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Batch Configuration
    // -------------------------------------------------------------------------
    /// What `write_batch` does when the engine handle is closed
    pub closed_batch_policy: ClosedBatchPolicy,
}

/// Behaviour of `write_batch` against a closed engine handle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClosedBatchPolicy {
    /// Fail with `NsKvError::NotOpen`, like every other data operation
    #[default]
    Reject,

    /// Drop the batch and report success (logged at warn level)
    Discard,
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the policy for batches written while the handle is closed
    pub fn closed_batch_policy(mut self, policy: ClosedBatchPolicy) -> Self {
        self.config.closed_batch_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
