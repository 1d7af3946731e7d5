//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what happened to each page (its title and slug) and
//! shows filesystem paths as indented context, so the summary reads as a
//! content inventory.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Rendered
//! 001 Hello, world → pages/hello-world/index.html
//! 002 Older post → pages/older-post/index.html
//!
//! Skipped
//!     drafts.md: No front-matter block - file must start with ---
//!
//! Pruned
//!     deleted-post/
//!
//! Pages: 2 unchanged, 2 rendered, 1 skipped (5 total)
//! Listings: 1 (12 pages known)
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 Hello, world
//!     Source: hello-world.md
//!
//! Skipped
//!     drafts.md: No front-matter block - file must start with ---
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::collect::{Collection, SkippedPage};
use crate::config::SiteConfig;
use crate::pipeline::BuildSummary;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Path relative to `base` when possible, for shorter display.
fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn skipped_section(skipped: &[SkippedPage], source_root: &Path, lines: &mut Vec<String>) {
    if skipped.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("Skipped".to_string());
    for s in skipped {
        lines.push(format!(
            "    {}: {}",
            display_relative(&s.path, source_root),
            s.reason
        ));
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the result of a build.
pub fn format_build_output(summary: &BuildSummary, config: &SiteConfig) -> Vec<String> {
    let mut lines = Vec::new();
    let output_root = &config.paths.output;

    if !summary.rendered.is_empty() {
        lines.push("Rendered".to_string());
        for (i, ((_, title), path)) in summary
            .rendered
            .iter()
            .zip(&summary.report.pages)
            .enumerate()
        {
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                title,
                display_relative(path, output_root)
            ));
        }
    }

    skipped_section(&summary.skipped, &config.paths.source, &mut lines);

    if !summary.report.pruned.is_empty() {
        lines.push(String::new());
        lines.push("Pruned".to_string());
        for name in &summary.report.pruned {
            lines.push(format!("    {}/", name));
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("Pages: {}", summary.stats));
    lines.push(format!(
        "Listings: {} ({} pages known)",
        summary.report.listings.len(),
        summary.known_pages
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(summary: &BuildSummary, config: &SiteConfig) {
    for line in format_build_output(summary, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the result of validating every source.
pub fn format_check_output(collection: &Collection, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in collection.rendered.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.title));
        lines.push(format!(
            "    Source: {}",
            display_relative(&page.source, source_root)
        ));
    }
    skipped_section(&collection.skipped, source_root, &mut lines);
    lines
}

/// Print check output to stdout.
pub fn print_check_output(collection: &Collection, source_root: &Path) {
    for line in format_check_output(collection, source_root) {
        println!("{}", line);
    }
}
