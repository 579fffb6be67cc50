//! Configuration type definitions
//!
//! Each type is self-contained with validation and sensible defaults.

pub mod chunking;

pub use chunking::ChunkingConfig;

use serde::{Deserialize, Serialize};

/// Main configuration struct aggregating all settings
///
/// This is the top-level shape the ingestion pipeline deserializes its
/// config file into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chunking budgets and behavior
    #[serde(default)]
    pub chunking: ChunkingConfig,
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.chunking.validate()?;
        Ok(())
    }
}
