//! Directory tree layer for the Makai Directory Manager.
//!
//! `DirectoryTree` is the façade between the command layer and the
//! [`KoaTrie`] index: it scans on-disk directories into the trie, attaches
//! entry metadata, and answers view/filter/glob queries. It consumes the
//! trie strictly through its public operations; in particular, subtree
//! listings are computed by filtering the root-anchored enumeration on the
//! paths stored in the payloads.

pub mod info;
pub mod scan;

use crate::config::display::SortKey;
use crate::config::scan::ScanConfig;
use crate::data_structures::KoaTrie;
use crate::error::MakaiResult;
use info::{EntryKind, FileKind, TreeEntry};
use scan::ScanReport;
use tracing::info;

/// Trie-backed directory index with metadata.
///
/// Scans insert parents before children, which is what keeps the trie's
/// directory-depth bookkeeping truthful.
#[derive(Debug, Default)]
pub struct DirectoryTree {
    trie: KoaTrie<TreeEntry>,
    config: ScanConfig,
}

/// Filter predicate for [`DirectoryTree::filter`].
#[derive(Debug, Default)]
pub struct EntryFilter {
    /// Keep entries whose name starts with this prefix
    pub prefix: Option<String>,

    /// Keep file entries of this kind; directories never match when set
    pub kind: Option<FileKind>,

    /// Keep entries strictly larger than this many bytes
    pub gt: Option<u64>,

    /// Keep entries strictly smaller than this many bytes
    pub lt: Option<u64>,
}

impl EntryFilter {
    fn matches(&self, entry: &TreeEntry) -> bool {
        if let Some(prefix) = &self.prefix {
            if !entry.name().starts_with(prefix.as_str()) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            match entry.kind {
                EntryKind::File(file_kind) if file_kind == kind => {}
                _ => return false,
            }
        }
        if self.gt.is_some() || self.lt.is_some() {
            let size = match entry.size {
                Some(size) => size,
                // Size bounds exclude entries of unknown size
                None => return false,
            };
            if let Some(gt) = self.gt {
                if size <= gt {
                    return false;
                }
            }
            if let Some(lt) = self.lt {
                if size >= lt {
                    return false;
                }
            }
        }
        true
    }
}

impl DirectoryTree {
    /// Creates an empty directory tree with default scan limits.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Creates an empty directory tree with the given scan limits.
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            trie: KoaTrie::new(),
            config,
        }
    }

    /// Scans `path` on disk and indexes everything under it.
    ///
    /// The scanned directory itself is inserted first, as a root entry;
    /// every subdirectory is inserted before its own children. Re-adding a
    /// directory re-indexes it in place.
    ///
    /// # Errors
    ///
    /// Scan failures (missing path, limit overruns, unreadable root) are
    /// reported before anything is indexed.
    pub fn add(&mut self, path: &str) -> MakaiResult<ScanReport> {
        let scanned = scan::scan_directory(path, &self.config)?;

        let mut report = ScanReport::default();
        for entry in scanned {
            if entry.is_dir {
                report.directories += 1;
                let payload = TreeEntry::directory(entry.path.clone(), entry.size);
                self.trie.insert(&entry.path, payload, true, entry.is_top)?;
            } else {
                report.files += 1;
                report.total_bytes += entry.size.unwrap_or(0);
                let payload = TreeEntry::file(entry.path.clone(), entry.size);
                self.trie.insert(&entry.path, payload, false, false)?;
            }
        }

        info!(
            path = %path,
            directories = report.directories,
            files = report.files,
            "Indexed directory"
        );
        Ok(report)
    }

    /// Removes the entry stored at `path`.
    ///
    /// Returns whether the path was known. The removal tombstones the trie
    /// node: descendants of a deleted directory stay indexed until deleted
    /// themselves.
    pub fn delete(&mut self, path: &str) -> MakaiResult<bool> {
        let existed = self.trie.get(path)?.is_some();
        self.trie.delete(path)?;
        if existed {
            info!(path = %path, "Deleted entry");
        }
        Ok(existed)
    }

    /// Returns the entries at and under `path`, sorted by path.
    ///
    /// An unknown path yields an empty listing. Viewing refreshes the
    /// access timestamp of the directory itself.
    pub fn view(&mut self, path: &str) -> MakaiResult<Vec<TreeEntry>> {
        if !self.trie.starts_with(path)? {
            return Ok(Vec::new());
        }

        // Refresh the viewed entry's access time; re-insertion overwrites
        // the payload without disturbing node placement.
        if let Some(entry) = self.trie.get(path)? {
            let mut touched = entry.clone();
            touched.touch(None);
            let is_dir = touched.kind.is_dir();
            self.trie.insert(path, touched, is_dir, false)?;
        }

        let child_prefix = format!("{path}/");
        let mut entries: Vec<TreeEntry> = self
            .trie
            .matching_prefix(path)
            .into_iter()
            .filter_map(|node| node.value.as_ref())
            .filter(|entry| entry.path == path || entry.path.starts_with(&child_prefix))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Returns the entries under `path` that pass `filter`, sorted by path.
    pub fn filter(&self, path: &str, filter: &EntryFilter) -> MakaiResult<Vec<TreeEntry>> {
        if !self.trie.starts_with(path)? {
            return Ok(Vec::new());
        }

        let child_prefix = format!("{path}/");
        let mut entries: Vec<TreeEntry> = self
            .trie
            .matching_prefix(path)
            .into_iter()
            .filter_map(|node| node.value.as_ref())
            .filter(|entry| entry.path.starts_with(&child_prefix))
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Returns the entries whose full path matches `pattern`, where `*`
    /// matches any single character.
    ///
    /// Matching requires exact length equality with the pattern; zero
    /// matches is an empty listing.
    pub fn glob(&self, pattern: &str) -> MakaiResult<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for key in self.trie.matching_pattern(pattern) {
            if let Some(entry) = self.trie.get(&key)? {
                entries.push(entry.clone());
            }
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Returns every stored entry, sorted for table display.
    pub fn table_view(&self, sort_by: SortKey, reverse: bool) -> Vec<TreeEntry> {
        let mut entries: Vec<TreeEntry> = self
            .trie
            .matching_prefix("")
            .into_iter()
            .filter_map(|node| node.value.as_ref())
            .cloned()
            .collect();

        match sort_by {
            SortKey::Name => entries.sort_by(|a, b| a.name().cmp(b.name())),
            SortKey::Size => entries.sort_by(|a, b| a.size.cmp(&b.size)),
            SortKey::Time => entries.sort_by(|a, b| a.uploaded.cmp(&b.uploaded)),
        }
        if reverse {
            entries.reverse();
        }
        entries
    }
}
