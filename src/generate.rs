//! HTML site generation.
//!
//! Stage 2 of the build. Takes the pages rendered by [`collect`](crate::collect)
//! and the new known-pages store, fills the layouts and writes the site.
//!
//! ## Generated Pages
//!
//! - **Page** (`/<pages_dir>/<slug>/index.html`): one per page rendered in
//!   this run. Unchanged pages keep the file written by an earlier build.
//! - **Homepage** (`/index.html`): the first listing chunk.
//! - **Listing pages** (`/<pagination_dir>/<n>/index.html`): chunks 2..n.
//!
//! ## Output Structure
//!
//! ```text
//! website/
//! ├── index.html                 # Listing page 1 (most recent pages)
//! ├── pages/
//! │   ├── hello-world/
//! │   │   └── index.html
//! │   └── older-post/
//! │       └── index.html
//! └── pagination/
//!     ├── 2/
//!     │   └── index.html
//!     └── 3/
//!         └── index.html
//! ```
//!
//! ## Cleanup
//!
//! After writing pages, any directory under `pages/` whose name is not a slug
//! in the known store is deleted; this removes pages whose source was
//! deleted. The whole `pagination/` tree is deleted and rewritten on every
//! build. Removal failures are logged and ignored.

use crate::collect::PageRecord;
use crate::config::SiteConfig;
use crate::layout::{self, Layouts};
use crate::paginate::{self, PaginationChunk};
use crate::store::KnownStore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a generate run wrote and removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GenerateReport {
    /// `index.html` files written for rendered pages.
    pub pages: Vec<PathBuf>,
    /// Page directory names deleted because their slug is no longer known.
    pub pruned: Vec<String>,
    /// `index.html` files written for listing pages, homepage first.
    pub listings: Vec<PathBuf>,
}

pub fn generate(
    config: &SiteConfig,
    layouts: &Layouts,
    rendered: &[PageRecord],
    known: &KnownStore,
) -> Result<GenerateReport, GenerateError> {
    let mut report = GenerateReport::default();

    let pages_dir = config.paths.pages_output();
    fs::create_dir_all(&pages_dir)?;

    for page in rendered {
        let dir = config.paths.page_output(&page.slug);
        fs::create_dir_all(&dir)?;
        let path = dir.join("index.html");
        fs::write(&path, render_page(config, layouts, page))?;
        debug!(path = %path.display(), "wrote page");
        report.pages.push(path);
    }

    report.pruned = prune_pages(&pages_dir, known)?;

    let chunks = paginate::paginate(known, config.build.per_page);
    report.listings = write_listings(config, layouts, &chunks)?;

    info!(
        pages = report.pages.len(),
        pruned = report.pruned.len(),
        listings = report.listings.len(),
        "site generated at {}",
        config.paths.output.display()
    );
    Ok(report)
}

/// Full HTML document for one page.
pub fn render_page(config: &SiteConfig, layouts: &Layouts, page: &PageRecord) -> String {
    let labels = &config.labels;
    let description = page
        .description
        .as_deref()
        .unwrap_or(&labels.default_description);
    let author = page.author.as_deref().unwrap_or(&labels.default_author);

    let head = layouts.head(&page.title, description);
    let body = layouts.page(
        &layout::format_date(page.timestamp, &labels.date_format),
        author,
        &page.checksum,
        &page.content,
        &page.title,
    );
    layouts.content(&head, &body)
}

/// Full HTML document for listing chunk `chunk` out of `total`.
pub fn render_listing(
    config: &SiteConfig,
    layouts: &Layouts,
    chunk: &PaginationChunk,
    total: usize,
) -> String {
    let labels = &config.labels;
    let head = layouts.head(
        &labels.listing_title(chunk.index),
        &labels.default_description,
    );

    let mut body = layouts.header().to_string();
    for summary in &chunk.pages {
        body.push_str(&layouts.preview(
            &layout::format_date(summary.timestamp, &labels.date_format),
            &config.paths.page_href(&summary.slug),
            &summary.title,
        ));
    }
    body.push_str(&layouts.pagination(chunk.index, total, &config.paths.pagination_dir));

    layouts.content(&head, &body)
}

/// Rewrite every listing page from scratch.
///
/// With no known pages an empty homepage is still written so a stale one
/// never lists deleted pages.
fn write_listings(
    config: &SiteConfig,
    layouts: &Layouts,
    chunks: &[PaginationChunk],
) -> Result<Vec<PathBuf>, GenerateError> {
    remove_dir_best_effort(&config.paths.pagination_output());

    let empty_home;
    let chunks = if chunks.is_empty() {
        empty_home = [PaginationChunk {
            index: 0,
            pages: Vec::new(),
        }];
        &empty_home[..]
    } else {
        chunks
    };

    let mut written = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let dir = config.paths.listing_output(chunk.index);
        fs::create_dir_all(&dir)?;
        let path = dir.join("index.html");
        fs::write(&path, render_listing(config, layouts, chunk, chunks.len()))?;
        debug!(path = %path.display(), "wrote listing page");
        written.push(path);
    }
    Ok(written)
}

/// Delete page directories whose name is not a known slug.
fn prune_pages(pages_dir: &Path, known: &KnownStore) -> Result<Vec<String>, GenerateError> {
    let mut pruned = Vec::new();
    for entry in fs::read_dir(pages_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if known.has_slug(&name) {
            continue;
        }
        if remove_dir_best_effort(&path) {
            pruned.push(name);
        }
    }
    pruned.sort();
    Ok(pruned)
}

/// Remove a directory tree, logging instead of failing. Returns whether
/// something was removed.
fn remove_dir_best_effort(path: &Path) -> bool {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not remove directory");
            false
        }
    }
}
