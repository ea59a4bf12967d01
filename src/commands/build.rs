use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{Args, build::Builder, config::CONFIG_FILE_NAME};

/// Directories next to the sites that hold shared assets, not a site.
const SHARED_DIRS: &[&str] = &["css", "media"];

pub fn run(args: &Args) -> Result<(), anyhow::Error> {
    if !args.sites {
        return build_site(&args.site);
    }

    let sites = discover_sites(&args.site)?;
    if sites.is_empty() {
        tracing::warn!(dir = %args.site.display(), "no sites found");
    }
    for site in sites {
        build_site(&site)?;
    }

    Ok(())
}

fn build_site(root: &Path) -> Result<(), anyhow::Error> {
    let builder = Builder::open(root)
        .with_context(|| format!("failed to load site {}", root.display()))?;
    let result = builder
        .build()
        .with_context(|| format!("failed to build site {}", root.display()))?;

    println!(
        "Built {} ({} pages, {} posts, {} indexes, {} on the front page)",
        result.site_root.display(),
        result.pages,
        result.posts,
        result.indexes,
        result.front_page_entries
    );

    Ok(())
}

/// Child directories of `dir` holding a site config, in name order.
fn discover_sites(dir: &Path) -> Result<Vec<PathBuf>, anyhow::Error> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read sites directory {}", dir.display()))?;

    let mut sites = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || SHARED_DIRS.contains(&name.as_ref()) {
            tracing::debug!(dir = %path.display(), "skipping");
            continue;
        }
        if !path.join(CONFIG_FILE_NAME).is_file() {
            tracing::warn!(dir = %path.display(), "no {CONFIG_FILE_NAME}, skipping");
            continue;
        }
        sites.push(path);
    }

    sites.sort();
    Ok(sites)
}
