//! Configuration type definitions.
//!
//! This module contains the data structures read from `site.config`.
//! These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Site configuration
// =============================================================================

/// The flat options mapping stored in `<site_root>/site.config`.
///
/// Every key also accepts the Ruby-symbol spelling (`:posts:`), which YAML
/// reads as a key with a leading colon.
///
/// ```yaml
/// page_template: templates/page.html
/// post_template: templates/post.html
/// posts: posts
/// front_page_entries: 5
/// archive_title: The Archive
/// master_root: /srv/www
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Page template, relative to the site root
    #[serde(alias = ":page_template")]
    pub page_template: PathBuf,

    /// Post template, relative to the site root
    #[serde(alias = ":post_template")]
    pub post_template: PathBuf,

    /// Root of the journal subtree, relative to the site root
    #[serde(alias = ":posts", default = "default_posts")]
    pub posts: PathBuf,

    /// How many of the most recent posts appear on the front page
    #[serde(alias = ":front_page_entries", default = "default_front_page_entries")]
    pub front_page_entries: usize,

    /// Title of the directory index at the root of the posts subtree
    #[serde(alias = ":archive_title", default = "default_archive_title")]
    pub archive_title: String,

    /// Prefix stripped from filesystem paths when computing links
    /// (defaults to the site root)
    #[serde(alias = ":master_root", default)]
    pub master_root: Option<PathBuf>,

    /// Markdown extensions enabled when rendering bodies
    #[serde(alias = ":markdown_extensions", default = "default_markdown_extensions")]
    pub markdown_extensions: Vec<String>,
}

fn default_posts() -> PathBuf {
    PathBuf::from("posts")
}

fn default_front_page_entries() -> usize {
    10
}

fn default_archive_title() -> String {
    "Archive".to_string()
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "tables".to_string(),
        "footnotes".to_string(),
        "strikethrough".to_string(),
        "smart_punctuation".to_string(),
    ]
}
