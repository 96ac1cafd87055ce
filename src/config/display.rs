//! Display configuration module.
//!
//! This module defines how listings are rendered: default sort order and
//! size formatting.

use super::ConfigResult;
use super::Validate;
use serde::{Deserialize, Serialize};

/// Column a table view can be sorted by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Sort by entry name
    Name,
    /// Sort by size in bytes; unknown sizes sort first
    Size,
    /// Sort by upload time
    Time,
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Name
    }
}

impl SortKey {
    /// Parses a sort key as typed by the user (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "size" => Some(Self::Size),
            "time" => Some(Self::Time),
            _ => None,
        }
    }
}

/// Listing display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Default sort column for table views
    pub sort_by: SortKey,

    /// Whether table views sort in descending order by default
    pub reverse: bool,

    /// Whether sizes are rendered with binary suffixes instead of raw bytes
    pub human_sizes: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sort_by: SortKey::default(),
            reverse: false,
            human_sizes: true,
        }
    }
}

impl Validate for DisplayConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}
