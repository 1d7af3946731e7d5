//! # Simple Blog
//!
//! A minimal static site generator for markdown blogs. Each markdown file in
//! a flat source directory becomes a page; the most recent pages are listed
//! on the homepage and on numbered listing pages after it.
//!
//! # Architecture: Incremental Pipeline
//!
//! ```text
//! 1. Collect   pages/*.md + known.json  →  rendered pages + new store
//! 2. Generate  rendered pages + store   →  website/
//! ```
//!
//! The store (`known.json`) maps a checksum of each source file's raw bytes
//! to the page's timestamp, slug and title. A source whose checksum is
//! already known, whose slug matches and whose output still exists is not
//! read or rendered again; its stored data is enough to list it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`collect`] | Stage 1 — scans sources, checksums them, renders new or changed pages |
//! | [`generate`] | Stage 2 — writes pages and listing pages, prunes deleted pages |
//! | [`pipeline`] | Runs both stages with the store load/save in between |
//! | [`store`] | The checksum → `[timestamp, slug, title]` store |
//! | [`paginate`] | Orders known pages by recency and splits them into listing chunks |
//! | [`layout`] | Layout files, `{{ TOKEN }}` substitution, dates, pagination bar |
//! | [`frontmatter`] | YAML front-matter splitting and parsing |
//! | [`naming`] | Slugs, markdown detection, the numeric-title rule |
//! | [`config`] | `blog.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Content Checksums Over Timestamps
//!
//! Change detection hashes file contents rather than comparing mtimes, so a
//! fresh `git clone` or `git checkout` does not trigger a full rebuild.
//!
//! ## External Layout Files
//!
//! The HTML shell lives in plain `.html` files with `{{ TOKEN }}`
//! placeholders, editable without recompiling. Built-in copies are embedded
//! so a blog needs no layouts directory to get started.
//!
//! ## Unchanged Pages Keep Their HTML
//!
//! A page is only re-rendered when its source changes. Editing a layout
//! therefore needs `build --force` to reach existing pages; listing pages
//! are always rewritten.

pub mod collect;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod layout;
pub mod naming;
pub mod output;
pub mod paginate;
pub mod pipeline;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
