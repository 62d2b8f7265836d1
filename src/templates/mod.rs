//! Embedded Tera templates for the server-rendered pages
//!
//! All views are compiled into the binary; there is no theme directory to
//! resolve at runtime.

use anyhow::Result;
use tera::{Context, Tera};

/// Template renderer with all views loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with the embedded views registered.
    ///
    /// Autoescaping stays on; rich-text bodies are rendered to HTML ahead
    /// of time and marked `safe` in the templates.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("views/layout.html")),
            ("index.html", include_str!("views/index.html")),
            ("post.html", include_str!("views/post.html")),
            ("fallback.html", include_str!("views/fallback.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::navigation::NavigationLinks;

    #[test]
    fn test_templates_parse() {
        TemplateRenderer::new().unwrap();
    }

    #[test]
    fn test_render_index_without_posts() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &SiteConfig::default());
        context.insert("featured", &Option::<crate::content::PostSummary>::None);
        context.insert("posts", &Vec::<crate::content::PostSummary>::new());
        context.insert("next_page", &Option::<String>::None);

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains("Publicações"));
        // No cursor, no load-more affordance.
        assert!(!html.contains("Carregar mais posts"));
    }

    #[test]
    fn test_render_fallback() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &SiteConfig::default());

        let html = renderer.render("fallback.html", &context).unwrap();
        assert!(html.contains("Carregando"));
    }

    #[test]
    fn test_render_post_without_navigation() {
        use crate::cms::testing::raw_doc;
        use crate::content::PostDetail;

        let config = SiteConfig::default();
        let post = PostDetail::from_raw(raw_doc("post-a", "Rodada decisiva"), &config).unwrap();

        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &config);
        context.insert("post", &post);
        context.insert("sections", &Vec::<serde_json::Value>::new());
        context.insert("navigation", &NavigationLinks::default());

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("Rodada decisiva"));
        assert!(!html.contains("Post anterior"));
        assert!(!html.contains("Próximo post"));
    }
}
