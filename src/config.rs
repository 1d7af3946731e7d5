//! Site configuration module.
//!
//! Handles loading, validating, and merging `blog.toml`. Stock defaults are
//! overridden by whatever the user's file specifies; CLI flags override both
//! (see `main.rs`).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! source = "pages"              # Markdown sources (flat directory)
//! output = "website"            # Generated site root
//! pages_dir = "pages"           # Subdirectory of output holding one dir per page
//! pagination_dir = "pagination" # Subdirectory of output holding listing pages 2..n
//! layouts = "layouts"           # Layout templates (missing files use built-ins)
//! known_file = "known.json"     # Checksum store
//!
//! [build]
//! force_rebuild = false         # Re-render every page, ignoring the store
//! per_page = 10                 # Pages listed per index page
//!
//! [labels]
//! home_title = "Home"
//! page_title = "Page {n}"       # {n} is the listing page number
//! default_description = ""
//! default_author = ""
//! date_format = "%d %b %Y"      # strftime pattern, dates are UTC
//! ```
//!
//! Relative paths resolve against the working directory. Unknown keys are
//! rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default name of the config file, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "blog.toml";

/// Site configuration loaded from `blog.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where sources, layouts, output and the store live.
    pub paths: PathsConfig,
    /// Rebuild behavior and listing size.
    pub build: BuildConfig,
    /// Text used on generated pages.
    pub labels: LabelsConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build.per_page == 0 {
            return Err(ConfigError::Validation(
                "build.per_page must be at least 1".into(),
            ));
        }
        let p = &self.paths;
        for (key, value) in [
            ("paths.source", &p.source),
            ("paths.output", &p.output),
            ("paths.layouts", &p.layouts),
            ("paths.known_file", &p.known_file),
        ] {
            if value.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        for (key, value) in [
            ("paths.pages_dir", &p.pages_dir),
            ("paths.pagination_dir", &p.pagination_dir),
        ] {
            if !is_single_component(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single directory name, got {value:?}"
                )));
            }
        }
        if p.pages_dir == p.pagination_dir {
            return Err(ConfigError::Validation(
                "paths.pages_dir and paths.pagination_dir must differ".into(),
            ));
        }
        if !is_valid_date_format(&self.labels.date_format) {
            return Err(ConfigError::Validation(format!(
                "labels.date_format is not a valid strftime pattern: {:?}",
                self.labels.date_format
            )));
        }
        Ok(())
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn is_valid_date_format(pattern: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Filesystem layout of inputs and outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory scanned for `*.md` sources (not recursive).
    pub source: PathBuf,
    /// Root of the generated site. Listing page 1 is `<output>/index.html`.
    pub output: PathBuf,
    /// Page directories live at `<output>/<pages_dir>/<slug>/`.
    pub pages_dir: String,
    /// Listing pages 2..n live at `<output>/<pagination_dir>/<n>/`.
    pub pagination_dir: String,
    pub layouts: PathBuf,
    /// JSON checksum store, kept between runs.
    pub known_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("pages"),
            output: PathBuf::from("website"),
            pages_dir: "pages".to_string(),
            pagination_dir: "pagination".to_string(),
            layouts: PathBuf::from("layouts"),
            known_file: PathBuf::from("known.json"),
        }
    }
}

impl PathsConfig {
    /// `<output>/<pages_dir>`
    pub fn pages_output(&self) -> PathBuf {
        self.output.join(&self.pages_dir)
    }

    /// `<output>/<pages_dir>/<slug>`
    pub fn page_output(&self, slug: &str) -> PathBuf {
        self.pages_output().join(slug)
    }

    /// `<output>/<pagination_dir>`
    pub fn pagination_output(&self) -> PathBuf {
        self.output.join(&self.pagination_dir)
    }

    /// Directory of listing page `index` (0-based); index 0 is the site root.
    pub fn listing_output(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.output.clone()
        } else {
            self.pagination_output().join((index + 1).to_string())
        }
    }

    /// Public URL of a page.
    pub fn page_href(&self, slug: &str) -> String {
        format!("/{}/{}", self.pages_dir, slug)
    }
}

/// Rebuild settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Render every page even when its checksum is already known.
    pub force_rebuild: bool,
    /// Number of pages per listing page. Must be at least 1.
    pub per_page: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            force_rebuild: false,
            per_page: 10,
        }
    }
}

/// Text inserted into generated pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    /// `<title>` of the first listing page.
    pub home_title: String,
    /// `<title>` of listing pages after the first; `{n}` is replaced by the
    /// 0-based chunk index.
    pub page_title: String,
    /// Used when a page has no `description` in its front-matter.
    pub default_description: String,
    /// Used when a page has no `author` in its front-matter.
    pub default_author: String,
    pub date_format: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            home_title: "Home".to_string(),
            page_title: "Page {n}".to_string(),
            default_description: String::new(),
            default_author: String::new(),
            date_format: "%d %b %Y".to_string(),
        }
    }
}

impl LabelsConfig {
    /// Title of listing page `index` (0-based).
    pub fn listing_title(&self, index: usize) -> String {
        if index == 0 {
            self.home_title.clone()
        } else {
            self.page_title.replace("{n}", &index.to_string())
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `blog.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Blog Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths resolve against the directory simple-blog runs in.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Paths
# ---------------------------------------------------------------------------
[paths]
# Directory of markdown sources. Only *.md files directly inside are read.
source = "pages"

# Root of the generated site.
output = "website"

# Each page is written to <output>/<pages_dir>/<slug>/index.html.
pages_dir = "pages"

# Listing pages after the first go to <output>/<pagination_dir>/<n>/index.html.
pagination_dir = "pagination"

# Layout templates: content.html, page.html, head.html, header.html,
# preview.html, pagination.html. Missing files fall back to built-ins.
layouts = "layouts"

# Checksum store used to skip unchanged pages.
known_file = "known.json"

# ---------------------------------------------------------------------------
# Build
# ---------------------------------------------------------------------------
[build]
# Re-render every page even if its source has not changed.
force_rebuild = false

# Number of pages listed per index page.
per_page = 10

# ---------------------------------------------------------------------------
# Labels
# ---------------------------------------------------------------------------
[labels]
# Title of the first index page.
home_title = "Home"

# Title of later index pages. {n} is replaced by the page index.
page_title = "Page {n}"

# Fallbacks for pages whose front-matter omits these fields.
default_description = ""
default_author = ""

# strftime pattern for dates. Timestamps are rendered in UTC.
date_format = "%d %b %Y"
"##
}
