//! Entry metadata for the directory tree.
//!
//! This module defines the payload stored at trie terminals: what kind of
//! entry a path is, when it was indexed and last touched, and how large it
//! is, together with the human-readable renderings the command layer prints.

use chrono::{DateTime, Local};
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Suffixes used when rendering byte counts, in ascending 1024 steps.
const SIZE_SUFFIXES: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Timestamp rendering used across listings.
const TIME_FORMAT: &str = "%Y-%m-%d at %H:%M:%S";

/// Broad file classification derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Plain text, source code, and anything unrecognized
    Text,
    /// Raster and vector images
    Image,
    /// Video containers
    Video,
    /// Audio formats
    Audio,
    /// Archives, executables, and other opaque binaries
    Application,
}

impl FileKind {
    /// Classifies a path by its extension.
    ///
    /// Unrecognized and missing extensions classify as [`FileKind::Text`]:
    /// anything not known to be binary is assumed readable.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" | "svg" | "ico" | "tiff") => {
                Self::Image
            }
            Some("mp4" | "mkv" | "avi" | "mov" | "webm" | "flv" | "wmv") => Self::Video,
            Some("mp3" | "wav" | "flac" | "ogg" | "aac" | "m4a" | "opus") => Self::Audio,
            Some(
                "zip" | "tar" | "gz" | "bz2" | "xz" | "7z" | "rar" | "pdf" | "exe" | "dll" | "so"
                | "bin" | "iso" | "deb" | "rpm",
            ) => Self::Application,
            _ => Self::Text,
        }
    }

    /// Parses a kind name as typed by the user (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "application" => Some(Self::Application),
            _ => None,
        }
    }

    /// Every kind name, for error messages listing the valid choices.
    pub fn names() -> [&'static str; 5] {
        ["text", "image", "video", "audio", "application"]
    }
}

impl Display for FileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Application => "application",
        };
        write!(f, "{name}")
    }
}

/// Whether a stored path is a directory or a classified file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory entry
    Directory,
    /// A file entry with its classification
    File(FileKind),
}

impl EntryKind {
    /// Returns true for directory entries.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory => write!(f, "dir"),
            Self::File(kind) => write!(f, "{kind}"),
        }
    }
}

/// Metadata payload stored at each trie terminal.
///
/// The full path is carried inside the payload because trie enumeration
/// reports nodes, not keys; every consumer that needs to know *where* an
/// entry lives reads it from here.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    /// Path of the entry as indexed, separators included
    pub path: String,

    /// Directory or classified file
    pub kind: EntryKind,

    /// When the entry was indexed
    pub uploaded: DateTime<Local>,

    /// When the entry was last viewed or refreshed
    pub accessed: DateTime<Local>,

    /// Size in bytes, if known
    pub size: Option<u64>,
}

impl TreeEntry {
    /// Creates a directory entry indexed now.
    pub fn directory<S: Into<String>>(path: S, size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
            uploaded: Local::now(),
            accessed: Local::now(),
            size,
        }
    }

    /// Creates a file entry indexed now, classified from its path.
    pub fn file<S: Into<String>>(path: S, size: Option<u64>) -> Self {
        let path = path.into();
        let kind = EntryKind::File(FileKind::from_path(&path));
        Self {
            path,
            kind,
            uploaded: Local::now(),
            accessed: Local::now(),
            size,
        }
    }

    /// Refreshes the access timestamp, and the size when a new one is known.
    pub fn touch(&mut self, size: Option<u64>) {
        self.accessed = Local::now();
        if size.is_some() {
            self.size = size;
        }
    }

    /// Final path component, used for name sorting and prefix filtering.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Size rendered with binary suffixes, `?B` when unknown.
    pub fn human_size(&self) -> String {
        match self.size {
            Some(size) => human_size(size),
            None => "?B".to_string(),
        }
    }

    /// Upload timestamp in listing format.
    pub fn uploaded_display(&self) -> String {
        self.uploaded.format(TIME_FORMAT).to_string()
    }

    /// Access timestamp in listing format.
    pub fn accessed_display(&self) -> String {
        self.accessed.format(TIME_FORMAT).to_string()
    }
}

/// Renders a byte count with 1024-based suffixes, two decimals, trailing
/// zeros trimmed.
pub fn human_size(size: u64) -> String {
    let mut value = size as f64;
    let mut index = 0;
    while value >= 1024.0 && index < SIZE_SUFFIXES.len() - 1 {
        value /= 1024.0;
        index += 1;
    }
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", trimmed, SIZE_SUFFIXES[index])
}
