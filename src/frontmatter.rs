//! Front-matter extraction and parsing.
//!
//! Every page starts with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! timestamp: 1700000000
//! title: Hello, world
//! description: First post
//! author: Jane
//! ---
//!
//! Markdown body starts here.
//! ```
//!
//! `timestamp` (UNIX seconds) and `title` are required; everything else is
//! optional and unknown keys are ignored.

use serde::{Deserialize, Deserializer};

/// Parsed front-matter of a page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FrontMatter {
    /// Publication time in UNIX seconds. Drives listing order.
    #[serde(deserialize_with = "timestamp_seconds")]
    pub timestamp: i64,

    /// Page title. YAML numbers are accepted and kept as their decimal text.
    #[serde(deserialize_with = "string_or_number")]
    pub title: String,

    /// Used for the `<meta name="description">` of the page.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub author: Option<String>,
}

/// Errors that can occur when parsing front-matter.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrontmatterError {
    #[error("No front-matter block - file must start with ---")]
    Missing,

    #[error("Unclosed front-matter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in front-matter: {0}")]
    InvalidYaml(String),
}

/// Split a source into its raw YAML block and the body that follows.
///
/// The opening fence must be the first line. The body has leading blank
/// lines removed.
pub fn split_frontmatter(source: &str) -> Result<(&str, &str), FrontmatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');

    match lines.next() {
        Some(first) if is_fence(first) => {}
        _ => return Err(FrontmatterError::Missing),
    }

    let yaml_start = source
        .find('\n')
        .map(|i| i + 1)
        .ok_or(FrontmatterError::Unclosed)?;
    let mut offset = yaml_start;
    for line in lines {
        if is_fence(line) {
            let yaml = &source[yaml_start..offset];
            let body = &source[offset + line.len()..];
            return Ok((yaml, body.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unclosed)
}

/// Extract and parse front-matter.
///
/// Returns the parsed front-matter and the remaining markdown body.
pub fn extract_frontmatter(source: &str) -> Result<(FrontMatter, &str), FrontmatterError> {
    let (yaml, body) = split_frontmatter(source)?;
    let frontmatter: FrontMatter =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;
    Ok((frontmatter, body))
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Scalar::deserialize(d)? {
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Text(s) => s,
    })
}

fn timestamp_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Int(n) => Ok(n),
        Scalar::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
        Scalar::Float(_) => Err(serde::de::Error::custom("timestamp must be finite")),
        Scalar::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid timestamp: {s:?}"))),
    }
}
