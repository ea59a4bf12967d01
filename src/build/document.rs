use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::dates::resolve_timestamp;
use super::markdown::{MarkdownOptions, render_markdown};
use super::paths::{link_for, output_path};
use super::registry::ContentRegistry;

#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed metadata in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("{path} is missing required field '{field}'")]
    MissingField { path: PathBuf, field: &'static str },
}

// =============================================================================
// Content units
// =============================================================================

/// One parsed source document: a top-level page, or the shared part of a post.
#[derive(Debug, Clone)]
pub struct ContentUnit {
    /// Where the document was read from
    pub source_path: PathBuf,
    /// Where its rendered HTML is written
    pub output_path: PathBuf,
    pub title: Option<String>,
    /// Markdown source of the body
    pub body_raw: String,
    /// `body_raw` run through the markdown transform
    pub body_html: String,
}

/// A journal entry: a content unit plus its date, location and link.
#[derive(Debug, Clone)]
pub struct Post {
    pub unit: ContentUnit,
    /// Derived from the source path, see `dates::resolve_timestamp`
    pub timestamp: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Site link of the rendered post (output path minus the master root)
    pub link: String,
}

// =============================================================================
// Metadata
// =============================================================================

/// Metadata fields recognised in a source document.
///
/// Keys may carry a leading colon (`:title:`), the way Ruby writes symbols to
/// YAML. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontMatter {
    #[serde(alias = ":title")]
    pub title: Option<String>,
    #[serde(alias = ":body")]
    pub body: Option<String>,
    #[serde(alias = ":latitude")]
    pub latitude: Option<f64>,
    #[serde(alias = ":longitude")]
    pub longitude: Option<f64>,
}

/// Parse a source document into its metadata, with `body` filled in.
///
/// Two shapes are accepted. A whole-file YAML mapping:
///
/// ```yaml
/// title: Arrival
/// latitude: 13.75
/// longitude: 100.5
/// body: |
///   Landed in *Bangkok*.
/// ```
///
/// Or a YAML front matter block delimited by `---`, followed by the markdown
/// body:
///
/// ```markdown
/// ---
/// title: Arrival
/// ---
///
/// Landed in *Bangkok*.
/// ```
///
/// A blank body after the front matter falls back to a `body` key inside it.
pub fn parse_document(path: &Path, content: &str) -> Result<FrontMatter, ContentError> {
    let malformed = |source: serde_yaml::Error| ContentError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let front_matter = match split_front_matter(content) {
        Some((yaml, body)) => {
            let mut front_matter: FrontMatter = if yaml.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str(yaml).map_err(malformed)?
            };
            if !body.trim().is_empty() {
                front_matter.body = Some(body.to_string());
            }
            front_matter
        }
        None => serde_yaml::from_str(content).map_err(malformed)?,
    };

    if front_matter.body.is_none() {
        return Err(ContentError::MissingField {
            path: path.to_path_buf(),
            field: "body",
        });
    }
    Ok(front_matter)
}

/// Split `---` delimited front matter from the text after it.
///
/// Returns `None` if the content does not open with a delimiter line or the
/// block is never closed.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start();
    let after_opening = content.strip_prefix("---")?;
    let after_opening = after_opening
        .strip_prefix("\r\n")
        .or_else(|| after_opening.strip_prefix('\n'))?;

    // Empty front matter: the closing delimiter comes straight away
    if let Some(rest) = after_opening.strip_prefix("---") {
        return Some(("", rest.trim_start_matches(['\r', '\n'])));
    }

    let closing_pos = after_opening.find("\n---")?;
    let yaml = &after_opening[..closing_pos];
    let rest = &after_opening[closing_pos + 4..];

    // The closing delimiter must be a line of its own
    let rest = match rest.find('\n') {
        Some(eol) if rest[..eol].trim().is_empty() => &rest[eol + 1..],
        None if rest.trim().is_empty() => "",
        _ => return None,
    };

    Some((yaml, rest.trim_start_matches(['\r', '\n'])))
}

// =============================================================================
// Parser
// =============================================================================

/// Reads page and post sources into content units.
pub struct ContentParser {
    markdown: MarkdownOptions,
    master_root: PathBuf,
}

impl ContentParser {
    pub fn new(markdown: MarkdownOptions, master_root: PathBuf) -> Self {
        Self {
            markdown,
            master_root,
        }
    }

    /// Parse a top-level page.
    pub fn parse_page(&self, path: &Path) -> Result<ContentUnit, ContentError> {
        let (unit, _) = self.parse_unit(path)?;
        Ok(unit)
    }

    /// Parse a journal post and store it in `registry`.
    ///
    /// Returns the stored post. A post whose timestamp is already taken
    /// replaces the earlier one.
    pub fn parse_post<'r>(
        &self,
        path: &Path,
        registry: &'r mut ContentRegistry,
    ) -> Result<&'r Post, ContentError> {
        tracing::debug!(path = %path.display(), "parsing post");

        let (unit, front_matter) = self.parse_unit(path)?;
        let link = link_for(&unit.output_path, &self.master_root);

        let post = Post {
            timestamp: resolve_timestamp(path),
            latitude: front_matter.latitude,
            longitude: front_matter.longitude,
            link,
            unit,
        };

        Ok(registry.insert(post))
    }

    fn parse_unit(&self, path: &Path) -> Result<(ContentUnit, FrontMatter), ContentError> {
        let content = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut front_matter = parse_document(path, &content)?;
        let body_raw = front_matter.body.take().unwrap_or_default();
        let body_html = render_markdown(&body_raw, self.markdown);
        tracing::trace!(
            path = %path.display(),
            markdown = body_raw.len(),
            html = body_html.len(),
            "rendered body"
        );

        let unit = ContentUnit {
            source_path: path.to_path_buf(),
            output_path: output_path(path),
            title: front_matter.title.take(),
            body_raw,
            body_html,
        };

        Ok((unit, front_matter))
    }
}
