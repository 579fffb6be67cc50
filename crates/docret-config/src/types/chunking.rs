//! Chunking configuration

use serde::{Deserialize, Serialize};

/// Configuration for document chunking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum estimated tokens per chunk
    ///
    /// Should match the embedding model's input budget. Single atomic units
    /// (one glossary entry, one unsplittable line) may exceed it.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Overlap tokens between consecutive default-strategy chunks
    ///
    /// Provides context continuity across chunk boundaries.
    /// Recommended: ~10% of max_tokens.
    #[serde(default = "default_overlap")]
    pub overlap_tokens: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap(),
        }
    }
}

impl crate::validation::Validate for ChunkingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        validate_positive("chunking.max_tokens", self.max_tokens, 0)?;

        if self.overlap_tokens >= self.max_tokens {
            return Err(ConfigError::ValidationError {
                field: "chunking.overlap_tokens".to_string(),
                message: format!(
                    "overlap_tokens ({}) must be < max_tokens ({})",
                    self.overlap_tokens, self.max_tokens
                ),
            });
        }

        Ok(())
    }
}

fn default_max_tokens() -> usize {
    500
}

fn default_overlap() -> usize {
    50
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_valid() {
        let config = ChunkingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.overlap_tokens, 50);
    }

    #[test]
    fn test_overlap_too_large() {
        let config = ChunkingConfig {
            max_tokens: 100,
            overlap_tokens: 100, // Equal to max
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: ChunkingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.overlap_tokens, 50);
    }
}
