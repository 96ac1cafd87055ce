//! Error types for the Koa Path Trie.
//!
//! This module defines the error types that can occur during Koa Trie
//! operations.

/// Errors that can occur in Koa Trie operations.
///
/// The taxonomy is deliberately small: a missing key is an empty result,
/// not an error, so the only failure a keyed operation can report is being
/// handed an empty key.
#[derive(Debug, thiserror::Error)]
pub enum KoaTrieError {
    /// Error when an empty key or prefix is provided.
    #[error("key cannot be empty")]
    EmptyKey,
}
