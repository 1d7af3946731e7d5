//! One-call build orchestration.
//!
//! ```text
//! known.json ──load──► KnownStore ─┐
//!                                  ├─► collect ──► Collection ──save──► known.json
//! pages/*.md ──────────────────────┘                   │
//!                                                      ▼
//!                          layouts/ ──────────────► generate ──► website/
//! ```
//!
//! Layouts are loaded before anything is written, so a broken layouts
//! directory aborts the build without touching the store or the output.

use crate::collect::{self, CollectError, CollectStats, Collection, SkippedPage};
use crate::config::SiteConfig;
use crate::generate::{self, GenerateError, GenerateReport};
use crate::layout::{LayoutError, Layouts};
use crate::store::KnownStore;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Everything a build did, for reporting.
#[derive(Debug)]
pub struct BuildSummary {
    pub stats: CollectStats,
    /// `(slug, title)` of each page rendered in this run.
    pub rendered: Vec<(String, String)>,
    pub skipped: Vec<SkippedPage>,
    /// Number of pages in the saved store.
    pub known_pages: usize,
    pub report: GenerateReport,
}

/// Run a full build: load store, collect, save store, generate.
pub fn build(config: &SiteConfig) -> Result<BuildSummary, PipelineError> {
    let layouts = Layouts::load(&config.paths.layouts)?;
    let previous = KnownStore::load(&config.paths.known_file);

    let Collection {
        rendered,
        known,
        skipped,
        stats,
    } = collect::collect_pages(config, &previous)?;
    info!("{stats}");

    known.save(&config.paths.known_file)?;

    let report = generate::generate(config, &layouts, &rendered, &known)?;

    Ok(BuildSummary {
        stats,
        rendered: rendered
            .into_iter()
            .map(|p| (p.slug, p.title))
            .collect(),
        skipped,
        known_pages: known.len(),
        report,
    })
}

/// Parse every source without writing anything.
///
/// Ignores the store so that every file's front-matter is validated.
pub fn check(config: &SiteConfig) -> Result<Collection, PipelineError> {
    Layouts::load(&config.paths.layouts)?;
    let mut config = config.clone();
    config.build.force_rebuild = true;
    Ok(collect::collect_pages(&config, &KnownStore::empty())?)
}
