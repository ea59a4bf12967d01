//! Site-wide generators that run once the pages, posts and indexes are written.
//!
//! The built-in generators (feed, KML, map, gallery) are placeholders: they are
//! called in order on every build, log what they were handed and write nothing.
//! A real implementation can replace one without touching the rest of the build.

use super::builder::BuildError;
use super::registry::ContentRegistry;

/// What a generator may read after the main build.
pub struct ExtensionContext<'a> {
    pub registry: &'a ContentRegistry,
}

/// A stage that runs once after all content is written.
pub trait SiteExtension {
    /// Unique name for this generator.
    fn name(&self) -> &'static str;

    fn generate(&self, ctx: &ExtensionContext) -> Result<(), BuildError>;
}

/// News feed of the most recent posts.
pub struct FeedExtension;

/// KML document of the coordinates attached to posts.
pub struct KmlExtension;

/// Map page built from the KML document.
pub struct MapExtension;

/// Photo gallery.
pub struct GalleryExtension;

impl SiteExtension for FeedExtension {
    fn name(&self) -> &'static str {
        "feed"
    }

    fn generate(&self, ctx: &ExtensionContext) -> Result<(), BuildError> {
        skip(self, ctx);
        Ok(())
    }
}

impl SiteExtension for KmlExtension {
    fn name(&self) -> &'static str {
        "kml"
    }

    fn generate(&self, ctx: &ExtensionContext) -> Result<(), BuildError> {
        skip(self, ctx);
        Ok(())
    }
}

impl SiteExtension for MapExtension {
    fn name(&self) -> &'static str {
        "map"
    }

    fn generate(&self, ctx: &ExtensionContext) -> Result<(), BuildError> {
        skip(self, ctx);
        Ok(())
    }
}

impl SiteExtension for GalleryExtension {
    fn name(&self) -> &'static str {
        "gallery"
    }

    fn generate(&self, ctx: &ExtensionContext) -> Result<(), BuildError> {
        skip(self, ctx);
        Ok(())
    }
}

fn skip(extension: &dyn SiteExtension, ctx: &ExtensionContext) {
    tracing::debug!(
        extension = extension.name(),
        posts = ctx.registry.len(),
        "generator not implemented, nothing written"
    );
}

/// The generators every build runs, in order.
pub fn default_extensions() -> Vec<Box<dyn SiteExtension>> {
    vec![
        Box::new(FeedExtension),
        Box::new(KmlExtension),
        Box::new(MapExtension),
        Box::new(GalleryExtension),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extension_order() {
        let names: Vec<_> = default_extensions().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["feed", "kml", "map", "gallery"]);
    }

    #[test]
    fn test_placeholders_succeed() {
        let registry = ContentRegistry::new();
        let ctx = ExtensionContext {
            registry: &registry,
        };
        for extension in default_extensions() {
            assert!(extension.generate(&ctx).is_ok(), "{}", extension.name());
        }
    }
}
