//! Configuration types for docret
//!
//! This crate provides the typed, validated configuration surface shared by
//! the ingestion pipeline and the chunking core:
//! - Type-safe configuration structs with serde defaults
//! - Config validation with helpful error messages
//!
//! Loading config files (YAML/TOML/env merging) is the surrounding
//! pipeline's job; this crate only defines the shapes it deserializes into.
//!
//! # Example
//!
//! ```
//! use docret_config::{ChunkingConfig, Validate};
//!
//! let config = ChunkingConfig::default();
//! assert_eq!(config.max_tokens, 500);
//! config.validate().unwrap();
//! ```

pub mod error;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use error::{ConfigError, Result};
pub use types::*;

/// Trait for config validation
pub use validation::Validate;
