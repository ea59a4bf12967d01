use std::path::{Path, PathBuf};

use crate::config::{ConfigError, ResolvedSite};

use super::document::{ContentError, ContentParser};
use super::extension::{ExtensionContext, SiteExtension, default_extensions};
use super::index::DirectoryIndexer;
use super::markdown::MarkdownOptions;
use super::paths::{INDEX_FILE, is_hidden, is_page_source, is_post_source};
use super::registry::ContentRegistry;
use super::render::{PageContext, POST_TEMPLATE, RenderError, Renderer};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub struct BuildResult {
    pub site_root: PathBuf,
    pub pages: usize,
    pub posts: usize,
    pub indexes: usize,
    pub front_page_entries: usize,
}

/// What the posts traversal hands over to the front index.
struct Traversal {
    registry: ContentRegistry,
    posts: usize,
    indexes: usize,
}

pub struct Builder {
    site: ResolvedSite,
    parser: ContentParser,
    renderer: Renderer,
    extensions: Vec<Box<dyn SiteExtension>>,
}

impl Builder {
    /// Load and resolve the site at `site_root`.
    pub fn open(site_root: &Path) -> Result<Self, ConfigError> {
        Self::new(ResolvedSite::resolve(site_root)?)
    }

    pub fn new(site: ResolvedSite) -> Result<Self, ConfigError> {
        let markdown = MarkdownOptions::from_extensions(&site.config.markdown_extensions)?;
        let renderer = Renderer::new(&site.page_template.1, &site.post_template.1).map_err(
            |source| {
                let path = match &source {
                    RenderError::Syntax { template, .. } if *template == POST_TEMPLATE => {
                        site.post_template.0.clone()
                    }
                    _ => site.page_template.0.clone(),
                };
                ConfigError::TemplateSyntax { path, source }
            },
        )?;
        let parser = ContentParser::new(markdown, site.master_root.clone());

        Ok(Self {
            site,
            parser,
            renderer,
            extensions: default_extensions(),
        })
    }

    /// Add a generator to run after the built-in ones.
    #[allow(dead_code)]
    pub fn add_extension<E: SiteExtension + 'static>(&mut self, extension: E) -> &mut Self {
        self.extensions.push(Box::new(extension));
        self
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Top-level pages
        // 2. Posts and directory indexes, depth-first
        // 3. Front index from the registry
        // 4. Site-wide generators
        tracing::info!(site = %self.site.root.display(), "generating site");

        let pages = self.generate_pages()?;
        let traversal = self.generate_posts()?;
        let front_page_entries = self.generate_index(&traversal.registry)?;
        self.run_extensions(&traversal.registry)?;

        Ok(BuildResult {
            site_root: self.site.root.clone(),
            pages,
            posts: traversal.posts,
            indexes: traversal.indexes,
            front_page_entries,
        })
    }

    /// Render every `*.page` directly under the site root.
    fn generate_pages(&self) -> Result<usize, BuildError> {
        let root = &self.site.root;
        let mut count = 0;

        for entry in read_dir(root)? {
            let path = entry.path();
            let name = entry.file_name();
            if !path.is_file() || !is_page_source(&name.to_string_lossy()) {
                continue;
            }

            let page = self.parser.parse_page(&path)?;
            let html = self
                .renderer
                .render_page(&PageContext::new(page.title.as_deref(), &page.body_html))?;
            write_output(&page.output_path, &html)?;

            tracing::debug!(path = %path.display(), "generated a page");
            count += 1;
        }

        tracing::info!(pages = count, "generated pages");
        Ok(count)
    }

    /// Render every post and write the directory indexes of the posts tree.
    fn generate_posts(&self) -> Result<Traversal, BuildError> {
        let mut traversal = Traversal {
            registry: ContentRegistry::new(),
            posts: 0,
            indexes: 0,
        };

        let posts_dir = &self.site.posts_dir;
        if !posts_dir.is_dir() {
            tracing::warn!(path = %posts_dir.display(), "posts directory not found, skipping");
            return Ok(traversal);
        }

        tracing::info!(path = %posts_dir.display(), "parsing posts");
        let indexer = DirectoryIndexer {
            renderer: &self.renderer,
            posts_root: posts_dir,
            master_root: &self.site.master_root,
            archive_title: &self.site.config.archive_title,
        };
        self.walk_posts(posts_dir, &indexer, &mut traversal)?;

        tracing::info!(
            posts = traversal.posts,
            indexes = traversal.indexes,
            "generated posts"
        );
        Ok(traversal)
    }

    /// Depth-first: children first, then this directory's index.
    fn walk_posts(
        &self,
        dir: &Path,
        indexer: &DirectoryIndexer,
        traversal: &mut Traversal,
    ) -> Result<(), BuildError> {
        for entry in read_dir(dir)? {
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let file_type = entry.file_type().map_err(|source| BuildError::ReadDir {
                path: path.clone(),
                source,
            })?;

            if file_type.is_symlink() {
                tracing::debug!(path = %path.display(), "skipping symlink");
                continue;
            }
            if file_type.is_dir() {
                if is_hidden(&name) {
                    tracing::debug!(path = %path.display(), "skipping hidden directory");
                    continue;
                }
                self.walk_posts(&path, indexer, traversal)?;
            } else if is_post_source(&name) {
                self.generate_post(&path, &mut traversal.registry)?;
                traversal.posts += 1;
            }
        }

        indexer.write_index(dir)?;
        traversal.indexes += 1;
        Ok(())
    }

    fn generate_post(&self, path: &Path, registry: &mut ContentRegistry) -> Result<(), BuildError> {
        let post = self.parser.parse_post(path, registry)?;

        let fragment = self.renderer.render_post(post)?;
        let html = self
            .renderer
            .render_page(&PageContext::new(post.unit.title.as_deref(), &fragment))?;
        write_output(&post.unit.output_path, &html)?;

        tracing::debug!(path = %path.display(), "generated a post");
        Ok(())
    }

    /// Write the front page: the most recent posts, newest first, untitled.
    fn generate_index(&self, registry: &ContentRegistry) -> Result<usize, BuildError> {
        if registry.is_empty() {
            tracing::debug!("no posts, front index will be empty");
        }

        let fragments = registry
            .latest(self.site.config.front_page_entries)
            .map(|post| self.renderer.render_post(post))
            .collect::<Result<Vec<_>, _>>()?;

        let body = fragments.concat();
        let html = self.renderer.render_page(&PageContext::new(None, &body))?;
        write_output(&self.site.root.join(INDEX_FILE), &html)?;

        tracing::info!(entries = fragments.len(), "generated front index");
        Ok(fragments.len())
    }

    fn run_extensions(&self, registry: &ContentRegistry) -> Result<(), BuildError> {
        let ctx = ExtensionContext { registry };
        for extension in &self.extensions {
            tracing::debug!(extension = extension.name(), "running generator");
            extension.generate(&ctx)?;
        }
        Ok(())
    }
}

fn read_dir(dir: &Path) -> Result<Vec<std::fs::DirEntry>, BuildError> {
    let read_error = |source| BuildError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    std::fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map_err(read_error))
        .collect()
}

/// Write a generated file, naming the path on failure.
pub(super) fn write_output(path: &Path, html: &str) -> Result<(), BuildError> {
    std::fs::write(path, html).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })
}
