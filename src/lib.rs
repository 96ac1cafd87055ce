//! Makai Directory Manager Library
//!
//! This library contains the core components of the Makai Directory
//! Manager: the character-level path trie the index is built on, the
//! directory tree layer that scans filesystems into it, and the command
//! and prompt machinery of the interactive session. The library is
//! designed to be used by the binary crate, but can also be used as a
//! dependency by other projects.
//!
//! # Architecture
//!
//! The Makai Directory Manager is designed with the following principles
//! in mind:
//! - Strict component boundaries: the trie knows nothing about
//!   filesystems, commands, or display
//! - Synchronous, single-threaded core with ownership expressed in the
//!   type structure
//! - Comprehensive error handling and propagation
//! - Configuration validated before use

// Re-export public modules
pub mod commands;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod repl;
pub mod tree;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Makai Directory Manager.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function
pub fn init() -> error::MakaiResult<()> {
    // Set up global error reporter with tracing
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));

    // Initialize default configuration
    config::init_default_config()?;

    Ok(())
}
