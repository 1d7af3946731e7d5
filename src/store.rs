//! Known-pages store for incremental builds.
//!
//! Rendering a page means reading its source, parsing front-matter and
//! converting markdown to HTML. The store lets the collector skip all of that
//! for sources whose bytes have not changed since the last build.
//!
//! # Design
//!
//! The store is **content-addressed**: each entry is keyed by the checksum of
//! a source file's raw bytes and remembers just enough to list the page on
//! the index pages without re-reading it:
//!
//! ```json
//! {
//!   "3f1a9c02be47": [1700000000, "hello-world", "Hello, world"],
//!   "b81d004e9a1c": [1690000000, "older-post", "An older post"]
//! }
//! ```
//!
//! Each value is a `[timestamp, slug, title]` triple. Checksums are SHA-256
//! truncated to [`CHECKSUM_LEN`] hex characters. Content-based rather than
//! mtime-based so it survives `git checkout` (which resets modification
//! times).
//!
//! The store is rewritten wholesale after every scan: entries for deleted
//! sources disappear because the scan no longer reproduces them.
//!
//! ## Loading never fails
//!
//! A missing file is a first build; an unparsable file is treated the same
//! way after logging a warning. Either way the run proceeds with an empty
//! store, which means every page is rendered.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Number of hex characters kept from the SHA-256 digest.
pub const CHECKSUM_LEN: usize = 12;

/// What the store remembers about one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, String, String)", into = "(i64, String, String)")]
pub struct KnownEntry {
    /// UNIX timestamp from the page's front-matter.
    pub timestamp: i64,
    pub slug: String,
    pub title: String,
}

impl From<(i64, String, String)> for KnownEntry {
    fn from((timestamp, slug, title): (i64, String, String)) -> Self {
        Self {
            timestamp,
            slug,
            title,
        }
    }
}

impl From<KnownEntry> for (i64, String, String) {
    fn from(entry: KnownEntry) -> Self {
        (entry.timestamp, entry.slug, entry.title)
    }
}

/// Mapping of source checksum to [`KnownEntry`].
///
/// Backed by a `BTreeMap` so the serialized file is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnownStore {
    entries: BTreeMap<String, KnownEntry>,
}

impl KnownStore {
    /// Create an empty store (first build or forced rebuild).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from `path`. Returns an empty store if the file doesn't exist or
    /// can't be parsed.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no known-pages store, starting empty");
                return Self::empty();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read known-pages store, starting empty");
                return Self::empty();
            }
        };
        match serde_json::from_str(&content) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "known-pages store is corrupt, starting empty");
                Self::empty()
            }
        }
    }

    /// Save to `path`, replacing any previous store.
    ///
    /// Writes a sibling temporary file first and renames it into place, so
    /// an interrupted run leaves either the old or the new store.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = temp_path(path);
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)
    }

    pub fn get(&self, checksum: &str) -> Option<&KnownEntry> {
        self.entries.get(checksum)
    }

    pub fn contains(&self, checksum: &str) -> bool {
        self.entries.contains_key(checksum)
    }

    /// Record an entry, replacing any previous entry for the same checksum.
    pub fn insert(&mut self, checksum: String, entry: KnownEntry) {
        self.entries.insert(checksum, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in checksum order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KnownEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether any entry uses `slug`.
    pub fn has_slug(&self, slug: &str) -> bool {
        self.entries.values().any(|e| e.slug == slug)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "known.json".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Truncated SHA-256 of a byte slice, as lowercase hex.
pub fn checksum_bytes(bytes: &[u8]) -> String {
    let mut hex = format!("{:x}", Sha256::digest(bytes));
    hex.truncate(CHECKSUM_LEN);
    hex
}

/// Truncated SHA-256 of a file's contents.
pub fn checksum_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(checksum_bytes(&bytes))
}
