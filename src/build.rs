mod builder;
mod dates;
mod document;
mod extension;
mod index;
mod markdown;
mod paths;
mod registry;
mod render;

pub use builder::Builder;
pub use markdown::MarkdownError;
pub use render::RenderError;
