//! Shared test utilities for the simple-blog test suite.
//!
//! [`TestSite`] owns a temp directory laid out like a real blog checkout and
//! a [`SiteConfig`] whose paths all point inside it.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = TestSite::new();
//! site.write_page("hello", 100, "Hello", "Some *markdown*.");
//!
//! let summary = pipeline::build(&site.config).unwrap();
//! assert!(site.output().join("pages/hello/index.html").is_file());
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::store::KnownEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// A blog checkout in a temp directory.
///
/// ```text
/// <tmp>/
/// ├── pages/        # sources (created)
/// ├── layouts/      # not created; built-ins apply
/// ├── website/      # output
/// └── known.json
/// ```
pub struct TestSite {
    tmp: TempDir,
    pub config: SiteConfig,
}

impl TestSite {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let mut config = SiteConfig::default();
        config.paths.source = root.join("pages");
        config.paths.output = root.join("website");
        config.paths.layouts = root.join("layouts");
        config.paths.known_file = root.join("known.json");
        fs::create_dir_all(&config.paths.source).unwrap();
        Self { tmp, config }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn output(&self) -> PathBuf {
        self.config.paths.output.clone()
    }

    /// Write `<source>/<slug>.md` with front-matter. Returns its path.
    pub fn write_page(&self, slug: &str, timestamp: i64, title: &str, body: &str) -> PathBuf {
        self.write_raw(
            &format!("{slug}.md"),
            &format!("---\ntimestamp: {timestamp}\ntitle: \"{title}\"\n---\n\n{body}\n"),
        )
    }

    /// Write an arbitrary file into the source directory. Returns its path.
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.config.paths.source.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Pretend an earlier build wrote the page directory for `slug`.
    pub fn write_output_page(&self, slug: &str) {
        let dir = self.config.paths.page_output(slug);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), format!("<p>{slug}</p>")).unwrap();
    }
}

pub fn known_entry(timestamp: i64, slug: &str, title: &str) -> KnownEntry {
    KnownEntry {
        timestamp,
        slug: slug.to_string(),
        title: title.to_string(),
    }
}

// =========================================================================
// Output inspection
// =========================================================================

/// Every file under `root`, keyed by relative path, with its bytes.
pub fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    collect_files(root, root, &mut files);
    files
}

fn collect_files(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, Vec<u8>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let rel = path.strip_prefix(root).unwrap().to_path_buf();
            files.insert(rel, fs::read(&path).unwrap());
        }
    }
}
