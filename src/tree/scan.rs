//! Filesystem scanner feeding the directory tree.
//!
//! The walk is synchronous and materializes its results before anything is
//! indexed: a scan that blows a configured limit fails before the index is
//! touched. Entries come out in parent-before-child order, which is exactly
//! the order the trie's depth bookkeeping needs.

use crate::config::scan::ScanConfig;
use crate::error::scan::ScanError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One filesystem entry produced by a scan, in index key form.
#[derive(Debug)]
pub struct ScannedEntry {
    /// Index key: the scan argument joined with `/`-separated descendants
    pub path: String,

    /// Whether the entry is a directory
    pub is_dir: bool,

    /// File size in bytes; directories carry no size
    pub size: Option<u64>,

    /// Whether this is the top-level scanned directory itself
    pub is_top: bool,
}

/// Counters reported after a completed scan.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanReport {
    /// Number of directories indexed, the scanned root included
    pub directories: usize,

    /// Number of files indexed
    pub files: usize,

    /// Total bytes across indexed files
    pub total_bytes: u64,
}

/// Walks `root` and returns every indexable entry in pre-order.
///
/// Symbolic links are skipped unless the configuration says otherwise.
/// Unreadable children are skipped with a warning; an unreadable root is an
/// error. Exceeding `max_depth` or `max_entries` aborts the scan with
/// nothing indexed, since the caller only sees the materialized list.
pub fn scan_directory(root: &str, config: &ScanConfig) -> Result<Vec<ScannedEntry>, ScanError> {
    let root_path = PathBuf::from(root);
    if !root_path.exists() {
        return Err(ScanError::PathNotFound(root_path));
    }
    if !root_path.is_dir() {
        return Err(ScanError::NotADirectory(root_path));
    }

    let key = root.trim_end_matches('/').to_string();
    let mut entries = Vec::new();
    entries.push(ScannedEntry {
        path: key.clone(),
        is_dir: true,
        size: None,
        is_top: true,
    });

    walk(&root_path, &key, 1, config, &mut entries)?;

    debug!(root = %root, entries = entries.len(), "Scan complete");
    Ok(entries)
}

fn walk(
    dir: &Path,
    key: &str,
    depth: usize,
    config: &ScanConfig,
    entries: &mut Vec<ScannedEntry>,
) -> Result<(), ScanError> {
    if depth > config.max_depth {
        return Err(ScanError::TooDeep {
            path: dir.to_path_buf(),
            max_depth: config.max_depth,
        });
    }

    let read_dir = fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    // Deterministic key order regardless of what the OS hands back.
    let mut children: Vec<_> = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(entry) => children.push(entry),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
            }
        }
    }
    children.sort_by_key(|entry| entry.file_name());

    for child in children {
        let source = child.path();
        if !config.follow_symlinks && is_symlink(&source) {
            debug!(path = %source.display(), "Skipping symlink");
            continue;
        }

        let metadata = match child.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(path = %source.display(), error = %e, "Skipping entry with unreadable metadata");
                continue;
            }
        };

        let name = child.file_name();
        let name = match name.to_str() {
            Some(name) => name,
            None => {
                warn!(path = %source.display(), "Skipping entry with non-UTF-8 name");
                continue;
            }
        };
        let child_key = format!("{key}/{name}");

        if entries.len() >= config.max_entries {
            return Err(ScanError::TooManyEntries {
                max_entries: config.max_entries,
            });
        }

        if metadata.is_dir() {
            entries.push(ScannedEntry {
                path: child_key.clone(),
                is_dir: true,
                size: None,
                is_top: false,
            });
            walk(&source, &child_key, depth + 1, config, entries)?;
        } else {
            entries.push(ScannedEntry {
                path: child_key,
                is_dir: false,
                size: Some(metadata.len()),
                is_top: false,
            });
        }
    }

    Ok(())
}

/// A path is treated as a symlink if either the direct check or the
/// symlink metadata says so; unreadable metadata counts as a symlink and
/// gets skipped.
fn is_symlink(path: &Path) -> bool {
    if path.is_symlink() {
        return true;
    }
    match fs::symlink_metadata(path) {
        Ok(metadata) => metadata.file_type().is_symlink(),
        Err(_) => true,
    }
}
