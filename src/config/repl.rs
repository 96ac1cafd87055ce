//! REPL configuration module.
//!
//! This module defines configuration for the interactive prompt session:
//! the prompt string and the in-memory history bounds.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Interactive session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Prompt string printed before each command
    pub prompt: String,

    /// Maximum number of commands retained in the session history
    pub history_limit: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            history_limit: 500,
        }
    }
}

impl Validate for ReplConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.prompt.is_empty() {
            return Err(ConfigError::ValidationError(
                "Prompt cannot be empty".to_string(),
            ));
        }

        if self.history_limit == 0 {
            return Err(ConfigError::ValidationError(
                "history_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
