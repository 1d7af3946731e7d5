//! Source collection and change detection.
//!
//! Stage 1 of the build. Scans the source directory for markdown files and
//! decides, per file, whether it has to be rendered or whether the listing
//! data remembered in the [`KnownStore`] can be reused.
//!
//! ## Decision
//!
//! ```text
//! checksum(raw bytes)
//!   ├── force_rebuild set               → render
//!   ├── not in store                    → render
//!   ├── stored slug ≠ filename slug     → render  (file was renamed)
//!   ├── <pages>/<slug>/index.html gone  → render  (output was wiped)
//!   └── otherwise                       → reuse {timestamp, slug, title}
//! ```
//!
//! Reused pages are not re-rendered, so a layout change only reaches them
//! on a forced rebuild.
//!
//! Every collected page, rendered or reused, goes into the new store unless
//! its title is purely numeric ([`naming::is_numeric_title`]).
//!
//! ## Malformed Sources
//!
//! A file without a usable front-matter block, or that is not UTF-8, is
//! skipped with a warning and reported in [`Collection::skipped`]. It is not
//! rendered and not stored. The rest of the build proceeds.
//!
//! Two sources with identical bytes share a checksum. The first one in path
//! order is collected; later copies are skipped as duplicates.

use crate::config::SiteConfig;
use crate::frontmatter::{self, FrontmatterError};
use crate::naming;
use crate::store::{self, KnownEntry, KnownStore};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source directory not found: {0}")]
    MissingSource(PathBuf),
}

/// A page that was (re)rendered during this build.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    /// Truncated SHA-256 of the source file; the page's identity.
    pub checksum: String,
    pub timestamp: i64,
    pub slug: String,
    pub title: String,
    /// Rendered HTML of the markdown body.
    pub content: String,
    pub description: Option<String>,
    pub author: Option<String>,
    /// Source file, for reporting.
    pub source: PathBuf,
}

impl PageRecord {
    /// The listing data persisted in the store.
    pub fn known_entry(&self) -> KnownEntry {
        KnownEntry {
            timestamp: self.timestamp,
            slug: self.slug.clone(),
            title: self.title.clone(),
        }
    }
}

/// Why a source file produced no page.
#[derive(Debug, Error, PartialEq)]
pub enum SkipReason {
    #[error("{0}")]
    Frontmatter(#[from] FrontmatterError),
    #[error("file is not valid UTF-8")]
    NotUtf8,
    #[error("file name cannot be used as a slug")]
    InvalidName,
    #[error("same content as {0}")]
    Duplicate(String),
}

#[derive(Debug, PartialEq)]
pub struct SkippedPage {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Summary of change detection for a build run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectStats {
    pub rendered: u32,
    pub reused: u32,
    pub skipped: u32,
}

impl CollectStats {
    pub fn total(&self) -> u32 {
        self.rendered + self.reused + self.skipped
    }
}

impl fmt::Display for CollectStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reused > 0 || self.skipped > 0 {
            write!(f, "{} unchanged, {} rendered", self.reused, self.rendered)?;
            if self.skipped > 0 {
                write!(f, ", {} skipped", self.skipped)?;
            }
            write!(f, " ({} total)", self.total())
        } else {
            write!(f, "{} rendered", self.rendered)
        }
    }
}

/// Result of scanning the source directory.
#[derive(Debug, Default)]
pub struct Collection {
    /// Pages rendered in this run, in source path order.
    pub rendered: Vec<PageRecord>,
    /// The store to persist: every collected page minus numeric titles.
    pub known: KnownStore,
    pub skipped: Vec<SkippedPage>,
    pub stats: CollectStats,
}

/// Markdown sources directly inside `dir`, sorted by path.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>, CollectError> {
    if !dir.is_dir() {
        return Err(CollectError::MissingSource(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if naming::is_markdown(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Scan the configured source directory against `previous`.
pub fn collect_pages(config: &SiteConfig, previous: &KnownStore) -> Result<Collection, CollectError> {
    let force = config.build.force_rebuild;
    let mut collection = Collection::default();
    // checksum → slug of the first source seen with that content
    let mut claimed: HashMap<String, String> = HashMap::new();

    for path in source_files(&config.paths.source)? {
        let Some(slug) = naming::slug_for(&path) else {
            skip(&mut collection, path, SkipReason::InvalidName);
            continue;
        };

        let bytes = fs::read(&path)?;
        let checksum = store::checksum_bytes(&bytes);

        if let Some(first) = claimed.get(&checksum) {
            let reason = SkipReason::Duplicate(first.clone());
            skip(&mut collection, path, reason);
            continue;
        }
        claimed.insert(checksum.clone(), slug.clone());

        if !force && let Some(entry) = reusable(config, previous, &checksum, &slug) {
            debug!(slug = %slug, checksum = %checksum, "unchanged, reusing");
            collection.stats.reused += 1;
            remember(&mut collection.known, checksum, entry.clone());
            continue;
        }

        match build_page(&bytes, checksum, slug, &path) {
            Ok(page) => {
                debug!(slug = %page.slug, checksum = %page.checksum, "rendered");
                collection.stats.rendered += 1;
                remember(&mut collection.known, page.checksum.clone(), page.known_entry());
                collection.rendered.push(page);
            }
            Err(reason) => skip(&mut collection, path, reason),
        }
    }

    Ok(collection)
}

/// A stored entry that can stand in for rendering this source.
fn reusable<'a>(
    config: &SiteConfig,
    previous: &'a KnownStore,
    checksum: &str,
    slug: &str,
) -> Option<&'a KnownEntry> {
    previous.get(checksum).filter(|entry| {
        entry.slug == slug
            && config
                .paths
                .page_output(slug)
                .join("index.html")
                .is_file()
    })
}

fn remember(known: &mut KnownStore, checksum: String, entry: KnownEntry) {
    if naming::is_numeric_title(&entry.title) {
        debug!(slug = %entry.slug, title = %entry.title, "numeric title, not stored");
        return;
    }
    known.insert(checksum, entry);
}

fn skip(collection: &mut Collection, path: PathBuf, reason: SkipReason) {
    warn!(path = %path.display(), reason = %reason, "skipping page");
    collection.stats.skipped += 1;
    collection.skipped.push(SkippedPage { path, reason });
}

/// Parse front-matter and render the markdown body of one source.
fn build_page(
    bytes: &[u8],
    checksum: String,
    slug: String,
    path: &Path,
) -> Result<PageRecord, SkipReason> {
    let text = std::str::from_utf8(bytes).map_err(|_| SkipReason::NotUtf8)?;
    let (fm, body) = frontmatter::extract_frontmatter(text)?;

    Ok(PageRecord {
        checksum,
        timestamp: fm.timestamp,
        slug,
        title: fm.title,
        content: render_markdown(body),
        description: fm.description,
        author: fm.author,
        source: path.to_path_buf(),
    })
}

/// Convert markdown to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    let parser = Parser::new_ext(markdown, options);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}
