//! Configuration loading and types for turbine.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for `site.config` (`types`)
//! - Loading the config file (`load`)
//! - Resolving relative paths against the site root (`resolve`)

mod load;
mod resolve;
mod types;

use std::path::PathBuf;

pub use load::CONFIG_FILE_NAME;
pub use resolve::ResolvedSite;
pub use types::SiteConfig;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("site root does not exist: {0}")]
    SiteNotFound(PathBuf),

    #[error("{name} not found: {path}")]
    TemplateNotFound { name: &'static str, path: PathBuf },

    #[error("failed to read {name} {path}: {source}")]
    TemplateRead {
        name: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid template {path}: {source}")]
    TemplateSyntax {
        path: PathBuf,
        source: crate::build::RenderError,
    },

    #[error("invalid markdown settings: {0}")]
    Markdown(#[from] crate::build::MarkdownError),
}
