//! Archive indexes for the posts hierarchy.
//!
//! Every directory under the posts root gets an `index.html` linking to its
//! sub-directories (year, month, day) and to the posts it holds, newest first.
//! Symlinks are never listed.

use std::path::{Path, PathBuf};

use super::builder::{BuildError, write_output};
use super::paths::{INDEX_FILE, is_hidden, link_for, output_path, post_label};
use super::render::{PageContext, Renderer};

/// One line of a directory index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Directory name, or `HH:MM` for a post
    pub label: String,
    /// Site link the entry points at
    pub target: String,
}

/// Sort entries by label, descending.
///
/// Plain string order: `HH:MM` labels and zero-padded date segments come out
/// newest first.
pub fn sort_entries(entries: &mut [IndexEntry]) {
    entries.sort_by(|a, b| b.label.cmp(&a.label));
}

/// Render entries as a vertical list of links.
pub fn render_listing(entries: &[IndexEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("<h3><a href='{}'>{}</a></h3>\n", entry.target, entry.label))
        .collect()
}

/// Builds and writes directory indexes for one site.
pub struct DirectoryIndexer<'a> {
    pub renderer: &'a Renderer,
    pub posts_root: &'a Path,
    pub master_root: &'a Path,
    pub archive_title: &'a str,
}

impl DirectoryIndexer<'_> {
    /// Collect the sorted entries for the immediate children of `dir`.
    pub fn entries(&self, dir: &Path) -> Result<Vec<IndexEntry>, BuildError> {
        let read_error = |source| BuildError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let file_type = entry.file_type().map_err(read_error)?;

            if file_type.is_symlink() {
                continue;
            }
            if file_type.is_dir() {
                if is_hidden(&name) {
                    continue;
                }
                tracing::debug!(entry = %name, "adding directory entry");
                entries.push(IndexEntry {
                    label: name.to_string(),
                    target: link_for(&path.join(INDEX_FILE), self.master_root),
                });
            } else if let Some(label) = post_label(&name) {
                tracing::debug!(entry = %name, "adding post entry");
                entries.push(IndexEntry {
                    label,
                    target: link_for(&output_path(&path), self.master_root),
                });
            }
        }

        sort_entries(&mut entries);
        Ok(entries)
    }

    /// The archive title for the posts root, the base name elsewhere.
    pub fn title_for(&self, dir: &Path) -> String {
        if dir == self.posts_root {
            self.archive_title.to_string()
        } else {
            dir.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        }
    }

    /// Render and write `<dir>/index.html`.
    ///
    /// Must run after everything below `dir` has been processed.
    pub fn write_index(&self, dir: &Path) -> Result<PathBuf, BuildError> {
        tracing::debug!(dir = %dir.display(), "creating index");

        let entries = self.entries(dir)?;
        let title = self.title_for(dir);
        let body = render_listing(&entries);
        let html = self
            .renderer
            .render_page(&PageContext::new(Some(&title), &body))?;

        let output = dir.join(INDEX_FILE);
        write_output(&output, &html)?;
        Ok(output)
    }
}
