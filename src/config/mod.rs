//! Engine configuration
//!
//! Settings are plain serde structures so they can be read from JSON next
//! to the rest of a host application's configuration.

mod policy;

pub use policy::*;

use crate::condition::DEFAULT_CACHE_CAPACITY;
use crate::error::{Result, RuleEngineError};
use serde::{Deserialize, Serialize};

/// Rule engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// How stored rules combine when evaluated together
    pub match_mode: MatchMode,
    /// Handling of rules that fail to evaluate
    pub error_policy: ErrorPolicy,
    /// Maximum number of parsed expressions kept in the engine cache
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::All,
            error_policy: ErrorPolicy::Abort,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Deserialize and validate configuration from JSON.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(RuleEngineError::InvalidConfig(
                "cacheCapacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}
