//! Site resolution.
//!
//! Turns a site root directory into a `ResolvedSite`: the parsed config with
//! every relative path made absolute and both templates read into memory.

use std::path::{Path, PathBuf};

use super::{ConfigError, SiteConfig};

/// A site after resolution - all paths absolute, templates loaded.
#[derive(Debug, Clone)]
pub struct ResolvedSite {
    /// Absolute site root
    pub root: PathBuf,
    /// The parsed config
    pub config: SiteConfig,
    /// Absolute path to the posts subtree (may not exist)
    pub posts_dir: PathBuf,
    /// Absolute prefix stripped from paths to build links
    pub master_root: PathBuf,
    /// Page template path and source
    pub page_template: (PathBuf, String),
    /// Post template path and source
    pub post_template: (PathBuf, String),
}

impl ResolvedSite {
    /// Load `site.config` under `site_root` and resolve it.
    pub fn resolve(site_root: &Path) -> Result<Self, ConfigError> {
        let root = site_root
            .canonicalize()
            .map_err(|_| ConfigError::SiteNotFound(site_root.to_path_buf()))?;

        let config = SiteConfig::load_from_site(&root)?;
        Self::from_config(root, config)
    }

    /// Resolve an already parsed config against an absolute site root.
    pub fn from_config(root: PathBuf, config: SiteConfig) -> Result<Self, ConfigError> {
        let posts_dir = resolve_against(&root, &config.posts);
        let master_root = config
            .master_root
            .as_ref()
            .map(|p| resolve_against(&root, p))
            .unwrap_or_else(|| root.clone());

        let page_template = read_template("page template", &root, &config.page_template)?;
        let post_template = read_template("post template", &root, &config.post_template)?;

        Ok(Self {
            root,
            config,
            posts_dir,
            master_root,
            page_template,
            post_template,
        })
    }
}

/// Join `path` onto `base` unless it is already absolute.
fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

fn read_template(
    name: &'static str,
    root: &Path,
    path: &Path,
) -> Result<(PathBuf, String), ConfigError> {
    let path = resolve_against(root, path);
    if !path.is_file() {
        return Err(ConfigError::TemplateNotFound { name, path });
    }

    let source = std::fs::read_to_string(&path).map_err(|source| ConfigError::TemplateRead {
        name,
        path: path.clone(),
        source,
    })?;

    Ok((path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    fn write_site(dir: &Path, config: &str) {
        std::fs::create_dir_all(dir.join("templates")).unwrap();
        std::fs::write(dir.join("templates/page.html"), "{{ body }}").unwrap();
        std::fs::write(dir.join("templates/post.html"), "{{ body }}").unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), config).unwrap();
    }

    #[test]
    fn test_resolve_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        write_site(
            dir.path(),
            "page_template: templates/page.html\npost_template: templates/post.html\nposts: journal\n",
        );

        let site = ResolvedSite::resolve(dir.path()).unwrap();
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(site.root, root);
        assert_eq!(site.posts_dir, root.join("journal"));
        assert_eq!(site.master_root, root);
        assert_eq!(site.page_template.1, "{{ body }}");
    }

    #[test]
    fn test_resolve_absolute_master_root() {
        let dir = tempfile::tempdir().unwrap();
        write_site(
            dir.path(),
            "page_template: templates/page.html\npost_template: templates/post.html\nmaster_root: /srv/www\n",
        );

        let site = ResolvedSite::resolve(dir.path()).unwrap();
        assert_eq!(site.master_root, PathBuf::from("/srv/www"));
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        write_site(
            dir.path(),
            "page_template: templates/missing.html\npost_template: templates/post.html\n",
        );

        let err = ResolvedSite::resolve(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TemplateNotFound {
                name: "page template",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_site_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResolvedSite::resolve(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::SiteNotFound(_)));
    }
}
