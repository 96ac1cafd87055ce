//! Koa Path Trie Implementation
//!
//! This module provides a character-level trie for indexing filesystem-like
//! paths. Separators are ordinary characters as far as the trie is
//! concerned; what makes the structure path-aware is the directory
//! bookkeeping woven into node placement: every node records the number of
//! previously-inserted directory terminals traversed on the way to it.
//!
//! The trie is single-threaded by design. It owns its nodes outright and
//! callers needing to share it across execution contexts must provide their
//! own exclusion.

mod error;
mod node;

pub use error::KoaTrieError;
pub use node::TrieNode;

/// Result type for Koa Trie operations
pub type KoaTrieResult<T> = Result<T, KoaTrieError>;

/// Pattern character matching any single child character.
pub const WILDCARD: char = '*';

/// Koa Path Trie: a character-indexed prefix tree with directory-depth
/// bookkeeping.
///
/// Key features:
/// * Exact lookup, prefix tests and tombstoning deletion
/// * Enumeration of every stored entry in depth-first pre-order
/// * Single-character wildcard matching over fixed-length patterns
/// * Creation-time directory levels maintained without any separator
///   semantics
///
/// # Insertion order contract
///
/// A node's `depth` counts the directory terminals traversed before it at
/// the moment the node was created. Directories must therefore be inserted
/// before their children for depth to reflect nesting; inserting `"b/c"`
/// before `"b"` is marked as a directory gives the nodes of `"/c"` a lower
/// level than the reverse order would.
#[derive(Debug)]
pub struct KoaTrie<V> {
    /// The root node of the trie
    root: TrieNode<V>,
}

impl<V> KoaTrie<V> {
    /// Creates a new empty `KoaTrie`.
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(0),
        }
    }

    /// Inserts a key into the trie, associating it with `value`.
    ///
    /// Missing nodes along the path are created with the running directory
    /// level; the level is incremented each time the walk passes through a
    /// child already marked as a directory. The terminal node receives
    /// `value` and `is_dir`, overwriting whatever a previous insertion of
    /// the same key left there. When `as_root` is set the terminal node's
    /// depth is forced to 0, marking a designated root entry.
    ///
    /// # Errors
    ///
    /// Returns [`KoaTrieError::EmptyKey`] if `key` is empty. No mutation
    /// happens in that case.
    pub fn insert(&mut self, key: &str, value: V, is_dir: bool, as_root: bool) -> KoaTrieResult<()> {
        if key.is_empty() {
            return Err(KoaTrieError::EmptyKey);
        }

        let mut node = &mut self.root;
        let mut level = 1;
        for c in key.chars() {
            let child = node
                .children
                .entry(c)
                .or_insert_with(|| TrieNode::new(level));
            if child.is_dir {
                level += 1;
            }
            node = child;
        }

        node.value = Some(value);
        node.is_dir = is_dir;
        if as_root {
            node.depth = 0;
        }
        Ok(())
    }

    /// Removes the entry stored at `key`, if any.
    ///
    /// The terminal node is tombstoned: its value and directory flag are
    /// cleared but the node and its subtree stay in place, so descendants
    /// of a deleted directory remain reachable. Deleting an absent key is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`KoaTrieError::EmptyKey`] if `key` is empty.
    pub fn delete(&mut self, key: &str) -> KoaTrieResult<()> {
        if key.is_empty() {
            return Err(KoaTrieError::EmptyKey);
        }

        let mut node = &mut self.root;
        for c in key.chars() {
            match node.children.get_mut(&c) {
                Some(child) => node = child,
                None => return Ok(()),
            }
        }
        node.reset();
        Ok(())
    }

    /// Returns the value stored at `key`, or `None` if the path is missing
    /// or no entry terminates there.
    ///
    /// # Errors
    ///
    /// Returns [`KoaTrieError::EmptyKey`] if `key` is empty.
    pub fn get(&self, key: &str) -> KoaTrieResult<Option<&V>> {
        if key.is_empty() {
            return Err(KoaTrieError::EmptyKey);
        }

        let mut node = &self.root;
        for c in key.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(node.value.as_ref())
    }

    /// Checks whether any stored key starts with `prefix`.
    ///
    /// Every character of the prefix must resolve to an existing child;
    /// whether any node along the way carries a value is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns [`KoaTrieError::EmptyKey`] if `prefix` is empty.
    pub fn starts_with(&self, prefix: &str) -> KoaTrieResult<bool> {
        if prefix.is_empty() {
            return Err(KoaTrieError::EmptyKey);
        }

        let mut node = &self.root;
        for c in prefix.chars() {
            match node.children.get(&c) {
                Some(child) => node = child,
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Enumerates every stored entry in depth-first pre-order.
    ///
    /// The `prefix` argument is accepted for interface compatibility and
    /// ignored: enumeration always starts at the root. Callers wanting
    /// "everything under P" filter the result themselves (the payloads in
    /// this crate carry their full paths for exactly that reason). The
    /// returned sequence is materialized eagerly and each call produces a
    /// fresh traversal.
    pub fn matching_prefix(&self, _prefix: &str) -> Vec<&TrieNode<V>> {
        let mut results = Vec::new();
        Self::collect_entries(&self.root, &mut results);
        results
    }

    fn collect_entries<'a>(node: &'a TrieNode<V>, results: &mut Vec<&'a TrieNode<V>>) {
        if node.value.is_some() {
            results.push(node);
        }
        for child in node.children.values() {
            Self::collect_entries(child, results);
        }
    }

    /// Enumerates the stored keys matching `pattern`.
    ///
    /// [`WILDCARD`] at position `i` matches any one child character at that
    /// position; a literal character matches only itself. A key matches iff
    /// it has exactly the pattern's length and an entry terminates at it.
    /// Dead branches (a literal addressing a nonexistent child) yield
    /// nothing; zero matches is an empty result, never an error. Keys are
    /// returned as reconstructed strings in implementation-defined order.
    pub fn matching_pattern(&self, pattern: &str) -> Vec<String> {
        let pattern: Vec<char> = pattern.chars().collect();
        let mut results = Vec::new();
        let mut prefix = Vec::new();
        Self::collect_matches(&self.root, &mut prefix, &pattern, &mut results);
        results
    }

    fn collect_matches(
        node: &TrieNode<V>,
        prefix: &mut Vec<char>,
        pattern: &[char],
        results: &mut Vec<String>,
    ) {
        if prefix.len() == pattern.len() {
            if node.value.is_some() {
                results.push(prefix.iter().collect());
            }
            return;
        }

        let c = pattern[prefix.len()];
        if c == WILDCARD {
            for (&child_char, child) in &node.children {
                prefix.push(child_char);
                Self::collect_matches(child, prefix, pattern, results);
                prefix.pop();
            }
        } else if let Some(child) = node.children.get(&c) {
            prefix.push(c);
            Self::collect_matches(child, prefix, pattern, results);
            prefix.pop();
        }
    }
}

impl<V> Default for KoaTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}
