//! Data structures for the Makai Directory Manager.
//!
//! This module contains the specialized data structures the directory
//! manager is built on. Implementations here are pure and synchronous:
//! no interior locking, no I/O, ownership expressed directly in the type
//! structure. Exclusion across threads, where needed, is the caller's
//! responsibility.

pub mod koa_trie;

// Re-export common data structures
pub use koa_trie::{KoaTrie, KoaTrieError, KoaTrieResult, TrieNode, WILDCARD};
