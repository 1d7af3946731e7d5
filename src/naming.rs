//! Filename and title conventions shared by the collector and the writer.
//!
//! A source file `pages/hello-world.md` becomes the page slug `hello-world`,
//! which names its output directory (`website/pages/hello-world/`) and its
//! URL (`/pages/hello-world`). No prefix stripping or case folding happens:
//! the filesystem name is the slug.
//!
//! ## Numeric Titles
//!
//! Pages whose front-matter title consists solely of digits (`"404"`,
//! `"2024"`) are rendered but never recorded in the known-pages store. See
//! [`is_numeric_title`].

use std::path::Path;

/// Extension (case-insensitive) that marks a markdown source file.
const MARKDOWN_EXTENSION: &str = "md";

/// Derive the slug for a markdown source path.
///
/// Returns `None` when the stem is empty or not valid UTF-8, since such a
/// name cannot be used as a URL segment.
///
/// - `pages/hello-world.md` → `Some("hello-world")`
/// - `pages/2024-recap.MD` → `Some("2024-recap")`
/// - `pages/.md` → `None`
pub fn slug_for(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() || stem.starts_with('.') {
        return None;
    }
    Some(stem.to_string())
}

/// Whether `path` has a markdown extension. Does not touch the filesystem.
pub fn has_markdown_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
        .unwrap_or(false)
}

/// Whether `path` is an existing regular file with a markdown extension.
pub fn is_markdown(path: &Path) -> bool {
    path.is_file() && has_markdown_extension(path)
}

/// A title made only of decimal digits. Such pages are kept out of the store.
///
/// Empty titles are not numeric, and neither are numeric symbols such as
/// `½` or `Ⅻ`.
pub fn is_numeric_title(title: &str) -> bool {
    !title.is_empty() && title.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn slug_is_file_stem() {
        assert_eq!(
            slug_for(Path::new("pages/hello-world.md")),
            Some("hello-world".to_string())
        );
    }

    #[test]
    fn slug_keeps_numbers_and_dashes() {
        assert_eq!(
            slug_for(Path::new("pages/2024-recap.MD")),
            Some("2024-recap".to_string())
        );
    }

    #[test]
    fn slug_rejects_hidden_stem() {
        assert_eq!(slug_for(Path::new("pages/.md")), None);
        assert_eq!(slug_for(Path::new("pages/.draft.md")), None);
    }

    #[test]
    fn markdown_extension_is_case_insensitive() {
        assert!(has_markdown_extension(Path::new("a.md")));
        assert!(has_markdown_extension(Path::new("a.MD")));
        assert!(!has_markdown_extension(Path::new("a.markdown")));
        assert!(!has_markdown_extension(Path::new("a.txt")));
        assert!(!has_markdown_extension(Path::new("md")));
    }

    #[test]
    fn is_markdown_requires_regular_file() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("folder.md")).unwrap();
        fs::write(tmp.path().join("post.md"), "x").unwrap();

        assert!(is_markdown(&tmp.path().join("post.md")));
        assert!(!is_markdown(&tmp.path().join("folder.md")));
        assert!(!is_markdown(&tmp.path().join("missing.md")));
    }

    #[test]
    fn numeric_titles() {
        assert!(is_numeric_title("404"));
        assert!(is_numeric_title("2024"));
        assert!(!is_numeric_title(""));
        assert!(!is_numeric_title("2024 recap"));
        assert!(!is_numeric_title("-1"));
        assert!(!is_numeric_title("1.5"));
        assert!(!is_numeric_title("Hello"));
        assert!(!is_numeric_title("½"));
        assert!(!is_numeric_title("Ⅻ"));
        assert!(!is_numeric_title("²"));
    }
}
