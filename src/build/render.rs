use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context, Tera};

use super::document::Post;

/// Registered name of the outer page template.
pub const PAGE_TEMPLATE: &str = "page";
/// Registered name of the post fragment template.
pub const POST_TEMPLATE: &str = "post";

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("{template} template does not parse: {detail}")]
    Syntax {
        template: &'static str,
        detail: String,
    },

    #[error("failed to render {template} template: {detail}")]
    Template {
        template: &'static str,
        detail: String,
    },
}

impl RenderError {
    fn syntax(template: &'static str, error: tera::Error) -> Self {
        Self::Syntax {
            template,
            detail: error_chain(&error),
        }
    }

    fn template(template: &'static str, error: tera::Error) -> Self {
        Self::Template {
            template,
            detail: error_chain(&error),
        }
    }
}

/// Tera keeps the useful part of a message (e.g. the unknown variable) in
/// the error's sources.
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

/// The template renderer, wrapping Tera.
///
/// Holds exactly two templates. Output is never escaped: rendered fragments
/// are trusted HTML and get substituted verbatim into the page template.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Create a renderer from the page and post template sources.
    pub fn new(page_template: &str, post_template: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_template(PAGE_TEMPLATE, page_template)
            .map_err(|e| RenderError::syntax(PAGE_TEMPLATE, e))?;
        tera.add_raw_template(POST_TEMPLATE, post_template)
            .map_err(|e| RenderError::syntax(POST_TEMPLATE, e))?;

        Ok(Self { tera })
    }

    /// Render a post into an HTML fragment.
    pub fn render_post(&self, post: &Post) -> Result<String, RenderError> {
        self.render(POST_TEMPLATE, &PostContext::from(post))
    }

    /// Wrap a body (one or more fragments) in the page template.
    pub fn render_page(&self, page: &PageContext) -> Result<String, RenderError> {
        self.render(PAGE_TEMPLATE, page)
    }

    fn render<C: Serialize>(&self, name: &'static str, context: &C) -> Result<String, RenderError> {
        let context =
            Context::from_serialize(context).map_err(|e| RenderError::template(name, e))?;
        self.tera
            .render(name, &context)
            .map_err(|e| RenderError::template(name, e))
    }
}

/// Fields available to the page template.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub title: Option<&'a str>,
    pub body: &'a str,
}

impl<'a> PageContext<'a> {
    pub fn new(title: Option<&'a str>, body: &'a str) -> Self {
        Self { title, body }
    }
}

/// Fields available to the post template.
#[derive(Debug, Serialize)]
pub struct PostContext<'a> {
    pub title: Option<&'a str>,
    pub body: &'a str,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// RFC 3339, so Tera's `date` filter can format it
    pub date: DateTime<Utc>,
    pub link: &'a str,
}

impl<'a> From<&'a Post> for PostContext<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            title: post.unit.title.as_deref(),
            body: &post.unit.body_html,
            latitude: post.latitude,
            longitude: post.longitude,
            date: post.timestamp,
            link: &post.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;

    use super::*;
    use crate::build::document::ContentUnit;

    const PAGE: &str =
        "<html><title>{% if title %}{{ title }}{% endif %}</title><main>{{ body }}</main></html>";
    const POST: &str = "<article><h2><a href=\"{{ link }}\">{{ title }}</a></h2>{{ body }}</article>";

    fn post() -> Post {
        Post {
            unit: ContentUnit {
                source_path: PathBuf::from("/site/posts/2020/01/02/1000.post"),
                output_path: PathBuf::from("/site/posts/2020/01/02/1000.html"),
                title: Some("Ferry".to_string()),
                body_raw: "Fish & *chips*".to_string(),
                body_html: "<p>Fish &amp; <em>chips</em></p>\n".to_string(),
            },
            timestamp: Utc.with_ymd_and_hms(2020, 1, 2, 10, 0, 0).unwrap(),
            latitude: Some(13.75),
            longitude: Some(100.5),
            link: "/posts/2020/01/02/1000.html".to_string(),
        }
    }

    #[test]
    fn test_render_post_fields() {
        let renderer = Renderer::new(PAGE, POST).unwrap();
        let html = renderer.render_post(&post()).unwrap();

        assert_eq!(
            html,
            "<article><h2><a href=\"/posts/2020/01/02/1000.html\">Ferry</a></h2><p>Fish &amp; <em>chips</em></p>\n</article>"
        );
    }

    #[test]
    fn test_post_embedded_in_page_verbatim() {
        let renderer = Renderer::new(PAGE, POST).unwrap();
        let fragment = renderer.render_post(&post()).unwrap();
        let page = renderer
            .render_page(&PageContext::new(Some("Ferry"), &fragment))
            .unwrap();

        assert!(page.starts_with("<html><title>Ferry</title><main><article>"));
        assert!(page.contains("<p>Fish &amp; <em>chips</em></p>"));
        assert!(!page.contains("&lt;"));
        assert!(!page.contains("&amp;amp;"));
        assert!(page.ends_with("</article></main></html>"));
    }

    #[test]
    fn test_page_without_title() {
        let renderer = Renderer::new(PAGE, POST).unwrap();
        let page = renderer.render_page(&PageContext::new(None, "")).unwrap();
        assert_eq!(page, "<html><title></title><main></main></html>");
    }

    #[test]
    fn test_post_date_and_coordinates() {
        let renderer = Renderer::new(
            PAGE,
            "{{ date }}|{{ date | date(format=\"%Y-%m-%d %H:%M\") }}|{{ latitude }},{{ longitude }}",
        )
        .unwrap();
        let html = renderer.render_post(&post()).unwrap();
        assert_eq!(html, "2020-01-02T10:00:00Z|2020-01-02 10:00|13.75,100.5");
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let renderer = Renderer::new("{{ body }}{{ author }}", POST).unwrap();
        let err = renderer
            .render_page(&PageContext::new(None, "x"))
            .unwrap_err();

        assert!(matches!(err, RenderError::Template { template: "page", .. }));
        assert!(err.to_string().contains("author"));
    }

    #[test]
    fn test_page_fields_not_visible_to_post() {
        let renderer = Renderer::new(PAGE, "{{ body }}{{ output_path }}").unwrap();
        assert!(renderer.render_post(&post()).is_err());
    }

    #[test]
    fn test_syntax_error_at_load() {
        let err = Renderer::new(PAGE, "{{ title ").err().unwrap();
        assert!(matches!(err, RenderError::Syntax { template: "post", .. }));
    }
}
