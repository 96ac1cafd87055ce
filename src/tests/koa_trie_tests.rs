// Copyright (c) 2025 Makai Dirman Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Crate-level tests for the Koa Path Trie.
//!
//! The in-module suite covers the basics; these tests pin down the
//! contract corners: depth bookkeeping and its insertion-order
//! sensitivity, tombstoning, wildcard matching, and the property-based
//! invariants.

use crate::data_structures::{KoaTrie, KoaTrieError};
use crate::tests::test_utils::{key_strategy, value_strategy};
use proptest::prelude::*;
use std::collections::HashSet;

/// Walks a trie down `key` and returns the terminal node's depth.
fn depth_of(trie: &KoaTrie<String>, key: &str) -> usize {
    let target = trie
        .matching_prefix(key)
        .into_iter()
        .find(|node| node.value.as_deref() == Some(key))
        .expect("key not stored");
    target.depth
}

#[test]
fn test_depth_reflects_nesting_when_parents_come_first() {
    let mut trie = KoaTrie::new();
    // Directories inserted before their children, as the contract asks.
    trie.insert("data", "data".to_string(), true, true).unwrap();
    trie.insert("data/sub", "data/sub".to_string(), true, false)
        .unwrap();
    trie.insert("data/sub/file", "data/sub/file".to_string(), false, false)
        .unwrap();

    // The root entry is forced to depth 0; each directory boundary bumps
    // the level of everything created below it.
    assert_eq!(depth_of(&trie, "data"), 0);
    assert_eq!(depth_of(&trie, "data/sub"), 2);
    assert_eq!(depth_of(&trie, "data/sub/file"), 3);
}

#[test]
fn test_depth_is_lower_when_suffix_precedes_directory() {
    // Inserting the child before the parent directory exists gives its
    // nodes level 1: no directory terminal was there to traverse yet.
    let mut early = KoaTrie::new();
    early.insert("b/c", "child".to_string(), false, false).unwrap();
    early.insert("b", "parent".to_string(), true, false).unwrap();
    assert_eq!(depth_of(&early, "child"), 1);

    // The reverse order sees the directory marker and lands one deeper.
    let mut late = KoaTrie::new();
    late.insert("b", "parent".to_string(), true, false).unwrap();
    late.insert("b/c", "child".to_string(), false, false).unwrap();
    assert_eq!(depth_of(&late, "child"), 2);
}

#[test]
fn test_depth_assigned_at_creation_never_rewritten() {
    let mut trie = KoaTrie::new();
    trie.insert("ab", "first".to_string(), false, false).unwrap();
    // Marking "a" as a directory afterwards does not retrofit the depth
    // of the already-created 'b' node.
    trie.insert("a", "dir".to_string(), true, false).unwrap();
    trie.insert("ab", "second".to_string(), false, false).unwrap();

    assert_eq!(depth_of(&trie, "second"), 1);
}

#[test]
fn test_wildcard_excludes_wrong_middle_character() {
    let mut trie = KoaTrie::new();
    for key in ["abc", "abd", "axc"] {
        trie.insert(key, key.to_string(), false, false).unwrap();
    }

    let matched: HashSet<String> = trie.matching_pattern("a*c").into_iter().collect();
    assert_eq!(
        matched,
        HashSet::from(["abc".to_string(), "axc".to_string()])
    );
}

#[test]
fn test_wildcard_only_pattern_matches_by_length() {
    let mut trie = KoaTrie::new();
    for key in ["ab", "cd", "abc"] {
        trie.insert(key, key.to_string(), false, false).unwrap();
    }

    let matched: HashSet<String> = trie.matching_pattern("**").into_iter().collect();
    assert_eq!(matched, HashSet::from(["ab".to_string(), "cd".to_string()]));
}

#[test]
fn test_pattern_over_tombstoned_key_yields_nothing() {
    let mut trie = KoaTrie::new();
    trie.insert("abc", "abc".to_string(), false, false).unwrap();
    trie.delete("abc").unwrap();

    assert!(trie.matching_pattern("a*c").is_empty());
    // The structure is still there, only the value is gone.
    assert!(trie.starts_with("abc").unwrap());
}

#[test]
fn test_matching_prefix_skips_valueless_interior_nodes() {
    let mut trie = KoaTrie::new();
    trie.insert("abcd", 4, false, false).unwrap();

    let entries = trie.matching_prefix("a");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].value, Some(4));
}

proptest! {
    #[test]
    fn prop_insert_then_get_roundtrips(key in key_strategy(), value in value_strategy()) {
        let mut trie = KoaTrie::new();
        trie.insert(&key, value.clone(), false, false).unwrap();
        prop_assert_eq!(trie.get(&key).unwrap(), Some(&value));
    }

    #[test]
    fn prop_delete_then_get_is_none(key in key_strategy(), value in value_strategy()) {
        let mut trie = KoaTrie::new();
        trie.insert(&key, value, false, false).unwrap();
        trie.delete(&key).unwrap();
        prop_assert_eq!(trie.get(&key).unwrap(), None);
    }

    #[test]
    fn prop_delete_absent_key_is_noop(key in key_strategy()) {
        let mut trie: KoaTrie<String> = KoaTrie::new();
        trie.delete(&key).unwrap();
        prop_assert_eq!(trie.get(&key).unwrap(), None);
    }

    #[test]
    fn prop_every_prefix_of_stored_key_exists(key in key_strategy(), value in value_strategy()) {
        let mut trie = KoaTrie::new();
        trie.insert(&key, value, false, false).unwrap();

        let chars: Vec<char> = key.chars().collect();
        for end in 1..=chars.len() {
            let prefix: String = chars[..end].iter().collect();
            prop_assert!(trie.starts_with(&prefix).unwrap());
        }
    }

    #[test]
    fn prop_reinsertion_is_idempotent(key in key_strategy(), value in value_strategy()) {
        let mut trie = KoaTrie::new();
        trie.insert(&key, value.clone(), false, false).unwrap();
        trie.insert(&key, value.clone(), false, false).unwrap();

        prop_assert_eq!(trie.get(&key).unwrap(), Some(&value));
        prop_assert_eq!(trie.matching_prefix(&key).len(), 1);
    }

    #[test]
    fn prop_literal_pattern_matches_only_itself(key in key_strategy(), value in value_strategy()) {
        let mut trie = KoaTrie::new();
        trie.insert(&key, value, false, false).unwrap();

        // Keys from the generator contain no wildcard, so the key used as
        // a pattern is fully literal.
        let matched = trie.matching_pattern(&key);
        prop_assert_eq!(matched, vec![key]);
    }

    #[test]
    fn prop_pattern_matches_have_pattern_length(
        keys in proptest::collection::vec(key_strategy(), 1..8),
        pattern in key_strategy(),
    ) {
        let mut trie = KoaTrie::new();
        for key in &keys {
            trie.insert(key, key.clone(), false, false).unwrap();
        }

        let want = pattern.chars().count();
        for matched in trie.matching_pattern(&pattern) {
            prop_assert_eq!(matched.chars().count(), want);
        }
    }
}

#[test]
fn test_empty_key_rejected_everywhere() {
    let mut trie = KoaTrie::new();
    assert!(matches!(
        trie.insert("", 0, false, false),
        Err(KoaTrieError::EmptyKey)
    ));
    assert!(matches!(trie.get(""), Err(KoaTrieError::EmptyKey)));
    assert!(matches!(trie.delete(""), Err(KoaTrieError::EmptyKey)));
    assert!(matches!(trie.starts_with(""), Err(KoaTrieError::EmptyKey)));
}
