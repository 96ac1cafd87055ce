//! Scan configuration module.
//!
//! This module defines limits applied while walking on-disk directories
//! into the index, keeping a single `add` from swallowing an unbounded
//! filesystem.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Directory scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum directory nesting depth a single scan will descend
    pub max_depth: usize,

    /// Maximum number of entries a single scan will index
    pub max_entries: usize,

    /// Whether to follow symbolic links while scanning
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_entries: 100_000,
            follow_symlinks: false,
        }
    }
}

impl Validate for ScanConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::ValidationError(
                "max_depth must be greater than 0".to_string(),
            ));
        }

        if self.max_entries == 0 {
            return Err(ConfigError::ValidationError(
                "max_entries must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
