//! Configuration loading from files.
//!
//! This module handles reading and parsing `site.config`.

use std::path::Path;

use super::{ConfigError, SiteConfig};

/// Name of the config file expected at the top of every site.
pub const CONFIG_FILE_NAME: &str = "site.config";

impl SiteConfig {
    /// Load the config stored at `<site_root>/site.config`.
    pub fn load_from_site(site_root: &Path) -> Result<Self, ConfigError> {
        Self::load_from_file(&site_root.join(CONFIG_FILE_NAME))
    }

    /// Load the config from a file path
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: format_config_error(e),
        })
    }
}

/// Format a deserialization error with helpful context
fn format_config_error(e: serde_yaml::Error) -> String {
    let msg = e.to_string();

    if msg.contains("missing field `page_template`") || msg.contains("missing field `post_template`")
    {
        return format!(
            "{msg}\n\nBoth templates are required, e.g.:\n  page_template: templates/page.html\n  post_template: templates/post.html"
        );
    }
    if msg.contains("front_page_entries") {
        return format!("{msg} ('front_page_entries' must be a non-negative integer)");
    }

    msg
}
