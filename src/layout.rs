//! Layout files and placeholder substitution.
//!
//! The site's HTML shell lives in plain files under the layouts directory,
//! with `{{ TOKEN }}` placeholders filled in at build time:
//!
//! | File | Tokens |
//! |------|--------|
//! | `content.html` | `HEAD`, `CONTENT` — outer document for every output page |
//! | `head.html` | `TITLE`, `DESCRIPTION` |
//! | `page.html` | `DATE`, `AUTHOR`, `CHECKSUM`, `CONTENT`, `TITLE` |
//! | `header.html` | none — prepended to every listing page |
//! | `preview.html` | `DATE`, `LINK`, `TITLE` — one per listed page |
//! | `pagination.html` | `PAGINATION` — link bar on listing pages |
//!
//! A file missing from the layouts directory falls back to the built-in
//! version compiled into the binary (see `simple-blog gen-layouts`).
//!
//! Plain-text values (titles, author, description, dates) are HTML-escaped
//! with maud before substitution; rendered markdown is inserted as-is.

use maud::html;
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("cannot read layout {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write layout {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

const CONTENT: &str = "content.html";
const PAGE: &str = "page.html";
const HEAD: &str = "head.html";
const PREVIEW: &str = "preview.html";
const PAGINATION: &str = "pagination.html";
const HEADER: &str = "header.html";

/// Built-in layouts, keyed by file name.
const BUILTIN: [(&str, &str); 6] = [
    (CONTENT, include_str!("../layouts/content.html")),
    (PAGE, include_str!("../layouts/page.html")),
    (HEAD, include_str!("../layouts/head.html")),
    (PREVIEW, include_str!("../layouts/preview.html")),
    (PAGINATION, include_str!("../layouts/pagination.html")),
    (HEADER, include_str!("../layouts/header.html")),
];

fn builtin(name: &str) -> &'static str {
    BUILTIN
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, body)| *body)
        .unwrap_or_default()
}

/// The six layout templates, loaded once per build.
#[derive(Debug, Clone)]
pub struct Layouts {
    content: String,
    page: String,
    head: String,
    preview: String,
    pagination: String,
    header: String,
}

impl Layouts {
    /// The layouts compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            content: builtin(CONTENT).to_string(),
            page: builtin(PAGE).to_string(),
            head: builtin(HEAD).to_string(),
            preview: builtin(PREVIEW).to_string(),
            pagination: builtin(PAGINATION).to_string(),
            header: builtin(HEADER).to_string(),
        }
    }

    /// Load layouts from `dir`, falling back to the built-in version for any
    /// file that does not exist. Other read errors are returned.
    pub fn load(dir: &Path) -> Result<Self, LayoutError> {
        Ok(Self {
            content: load_one(dir, CONTENT)?,
            page: load_one(dir, PAGE)?,
            head: load_one(dir, HEAD)?,
            preview: load_one(dir, PREVIEW)?,
            pagination: load_one(dir, PAGINATION)?,
            header: load_one(dir, HEADER)?,
        })
    }

    /// Outer document: head fragment plus body content.
    pub fn content(&self, head: &str, content: &str) -> String {
        substitute(&self.content, &[("HEAD", head), ("CONTENT", content)])
    }

    /// Article body for one page. `content` is trusted HTML.
    pub fn page(&self, date: &str, author: &str, checksum: &str, content: &str, title: &str) -> String {
        let (date, author, checksum, title) =
            (escape(date), escape(author), escape(checksum), escape(title));
        substitute(
            &self.page,
            &[
                ("DATE", date.as_str()),
                ("AUTHOR", author.as_str()),
                ("CHECKSUM", checksum.as_str()),
                ("CONTENT", content),
                ("TITLE", title.as_str()),
            ],
        )
    }

    pub fn head(&self, title: &str, description: &str) -> String {
        let (title, description) = (escape(title), escape(description));
        substitute(
            &self.head,
            &[("TITLE", title.as_str()), ("DESCRIPTION", description.as_str())],
        )
    }

    /// One entry on a listing page.
    pub fn preview(&self, date: &str, link: &str, title: &str) -> String {
        let (date, link, title) = (escape(date), escape(link), escape(title));
        substitute(
            &self.preview,
            &[
                ("DATE", date.as_str()),
                ("LINK", link.as_str()),
                ("TITLE", title.as_str()),
            ],
        )
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Link bar for listing page `current` (0-based) out of `total`.
    ///
    /// Empty when there is only one listing page.
    pub fn pagination(&self, current: usize, total: usize, pagination_dir: &str) -> String {
        if total <= 1 {
            return String::new();
        }
        let links = pagination_links(current, total, pagination_dir);
        substitute(&self.pagination, &[("PAGINATION", links.as_str())])
    }
}

fn load_one(dir: &Path, name: &str) -> Result<String, LayoutError> {
    let path = dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(body) => Ok(body),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(layout = name, "layout not found, using built-in");
            Ok(builtin(name).to_string())
        }
        Err(source) => Err(LayoutError::Read { path, source }),
    }
}

/// Write the built-in layouts into `dir`, skipping files that already exist.
///
/// Returns the paths that were written.
pub fn write_builtin(dir: &Path) -> Result<Vec<PathBuf>, LayoutError> {
    std::fs::create_dir_all(dir).map_err(|source| LayoutError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::new();
    for (name, body) in BUILTIN {
        let path = dir.join(name);
        if path.exists() {
            continue;
        }
        std::fs::write(&path, body).map_err(|source| LayoutError::Write {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}

/// URL of listing page `index` (0-based). Page 0 is the site root.
pub fn listing_href(index: usize, pagination_dir: &str) -> String {
    if index == 0 {
        "/".to_string()
    } else {
        format!("/{}/{}", pagination_dir, index + 1)
    }
}

fn pagination_links(current: usize, total: usize, pagination_dir: &str) -> String {
    html! {
        @for index in 0..total {
            a href=(listing_href(index, pagination_dir))
                class=(if index == current { "disabled" } else { "" }) {
                (index + 1)
            }
        }
    }
    .into_string()
}

/// Replace every `{{ NAME }}` placeholder whose name appears in `values`.
///
/// Substitution is a single pass over the template: unknown placeholders
/// are left untouched and inserted values are never re-scanned, so a page
/// body containing `{{ TITLE }}` stays literal.
pub fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let (before, tail) = rest.split_at(open);
        out.push_str(before);

        let Some(close) = tail.find("}}") else {
            out.push_str(tail);
            return out;
        };
        // A stray `{{` before the real placeholder is kept as text.
        if let Some(nested) = tail[2..close].rfind("{{") {
            out.push_str(&tail[..nested + 2]);
            rest = &tail[nested + 2..];
            continue;
        }
        let placeholder = &tail[..close + 2];
        let name = placeholder[2..close].trim();

        match values.iter().find(|(token, _)| *token == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(placeholder),
        }
        rest = &tail[close + 2..];
    }

    out.push_str(rest);
    out
}

/// HTML-escape plain text.
pub fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

/// Render a UNIX timestamp (seconds, UTC) with a strftime pattern.
///
/// Falls back to the raw number when the timestamp is out of range or the
/// pattern cannot be rendered.
pub fn format_date(timestamp: i64, pattern: &str) -> String {
    let Some(dt) = chrono::DateTime::from_timestamp(timestamp, 0) else {
        return timestamp.to_string();
    };
    let mut out = String::new();
    if write!(out, "{}", dt.format(pattern)).is_err() {
        return timestamp.to_string();
    }
    out
}
