//! Path predicates and URL conversion utilities.
//!
//! This module handles:
//! - Classifying directory entries (hidden, page source, post source)
//! - Source file paths to output file paths
//! - Filesystem paths to site links (stripping the master root)

use std::path::{Component, Path, PathBuf};

/// Extension of top-level page sources.
pub const PAGE_EXTENSION: &str = "page";
/// Extension of journal post sources.
pub const POST_EXTENSION: &str = "post";
/// Extension of every generated file.
pub const OUTPUT_EXTENSION: &str = "html";
/// File name of generated directory and front indexes.
pub const INDEX_FILE: &str = "index.html";

/// Returns true for names carrying the hidden-file marker.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Returns true for `<stem>.page` file names.
pub fn is_page_source(name: &str) -> bool {
    has_extension(name, PAGE_EXTENSION)
}

/// Returns true for `<stem>.post` file names.
pub fn is_post_source(name: &str) -> bool {
    has_extension(name, POST_EXTENSION)
}

fn has_extension(name: &str, extension: &str) -> bool {
    let path = Path::new(name);
    path.extension().is_some_and(|e| e == extension)
        && path.file_stem().is_some_and(|s| !s.is_empty())
}

/// Parse an `HHMM.post` file name into its `(hour, minute)` digit pairs.
///
/// The stem must be exactly four ASCII digits; the values themselves are not
/// range-checked.
pub fn post_slot(name: &str) -> Option<(&str, &str)> {
    if !is_post_source(name) {
        return None;
    }
    let stem = Path::new(name).file_stem()?.to_str()?;
    if stem.len() != 4 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(stem.split_at(2))
}

/// The `HH:MM` label a post file shows in its directory index.
pub fn post_label(name: &str) -> Option<String> {
    post_slot(name).map(|(hour, minute)| format!("{hour}:{minute}"))
}

/// Where the rendered HTML for a source file goes: same directory, same stem.
///
/// ```ignore
/// output_path("/site/about.page") => "/site/about.html"
/// output_path("/site/posts/2020/01/01/0900.post") => "/site/posts/2020/01/01/0900.html"
/// ```
pub fn output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}

/// Convert a filesystem path to a site link by stripping `master_root`.
///
/// Paths outside the master root keep their full path. Separators are always
/// `/` and the link always starts with one.
///
/// ```ignore
/// link_for("/srv/www/site/posts/2020", "/srv/www") => "/site/posts/2020"
/// link_for("/srv/www", "/srv/www") => "/"
/// ```
pub fn link_for(path: &Path, master_root: &Path) -> String {
    let relative = path.strip_prefix(master_root).unwrap_or(path);

    let segments: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(".git"));
        assert!(is_hidden(".drafts"));
        assert!(!is_hidden("2020"));
        assert!(!is_hidden("posts"));
    }

    #[test]
    fn test_source_predicates() {
        assert!(is_page_source("about.page"));
        assert!(!is_page_source("about.post"));
        assert!(!is_page_source(".page"));
        assert!(!is_page_source("about.page.bak"));

        assert!(is_post_source("0900.post"));
        assert!(is_post_source("notes.post"));
        assert!(!is_post_source("0900.html"));
        assert!(!is_post_source("post"));
    }

    #[test]
    fn test_post_slot() {
        assert_eq!(post_slot("0930.post"), Some(("09", "30")));
        assert_eq!(post_slot("2359.post"), Some(("23", "59")));
        assert_eq!(post_slot("930.post"), None);
        assert_eq!(post_slot("09300.post"), None);
        assert_eq!(post_slot("ab30.post"), None);
        assert_eq!(post_slot("0930.html"), None);
    }

    #[test]
    fn test_post_label() {
        assert_eq!(post_label("0930.post"), Some("09:30".to_string()));
        assert_eq!(post_label("notes.post"), None);
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/site/about.page")),
            PathBuf::from("/site/about.html")
        );
        assert_eq!(
            output_path(Path::new("/site/posts/2020/01/01/0900.post")),
            PathBuf::from("/site/posts/2020/01/01/0900.html")
        );
    }

    #[test]
    fn test_link_for_strips_master_root() {
        assert_eq!(
            link_for(Path::new("/srv/www/site/posts/2020"), Path::new("/srv/www")),
            "/site/posts/2020"
        );
        assert_eq!(
            link_for(Path::new("/srv/www/site/0900.html"), Path::new("/srv/www/")),
            "/site/0900.html"
        );
    }

    #[test]
    fn test_link_for_root() {
        assert_eq!(link_for(Path::new("/srv/www"), Path::new("/srv/www")), "/");
    }

    #[test]
    fn test_link_for_outside_master_root() {
        assert_eq!(
            link_for(Path::new("/other/posts"), Path::new("/srv/www")),
            "/other/posts"
        );
    }
}
