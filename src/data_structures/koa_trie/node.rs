//! Node implementation for the Koa Path Trie.
//!
//! This module provides the TrieNode structure used in the Koa Trie
//! implementation. Nodes are the fundamental building blocks of the trie,
//! each owning its children and carrying the directory bookkeeping that the
//! directory tree layer relies on.

use std::collections::HashMap;

/// A node in the Koa Path Trie.
///
/// Each node represents one character of a stored path. A node whose `value`
/// is present is a terminal: a key ends there. `depth` is the directory
/// level assigned when the node was created and never changes afterwards,
/// with the single exception of the root-entry override applied by
/// [`insert`](super::KoaTrie::insert).
#[derive(Debug)]
pub struct TrieNode<V> {
    /// Map of characters to owned child nodes
    pub children: HashMap<char, TrieNode<V>>,

    /// Payload stored at this node, if a key terminates here
    pub value: Option<V>,

    /// Whether the key ending at this node was inserted as a directory
    pub is_dir: bool,

    /// Directory level assigned at creation time
    pub depth: usize,
}

impl<V> TrieNode<V> {
    /// Creates a new empty trie node at the given directory level.
    pub fn new(depth: usize) -> Self {
        Self {
            children: HashMap::new(),
            value: None,
            is_dir: false,
            depth,
        }
    }

    /// Clears the payload and directory flag, leaving the structure intact.
    ///
    /// Children and `depth` are untouched: deleting an entry tombstones its
    /// terminal node, it never prunes the subtree below it.
    pub fn reset(&mut self) {
        self.value = None;
        self.is_dir = false;
    }
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self::new(0)
    }
}
