pub mod escape;
pub mod template;

pub use escape::escape_html;

use crate::error::McpResult;
use crate::news::Article;

use template::{SlotValue, Template};

/// Closed set of widget formats. Adding a format means adding a variant and
/// satisfying the exhaustive match in `Renderer::render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    Card,
    Carousel,
}

impl DisplayFormat {
    /// Missing or unrecognized format strings normalize to `Carousel`;
    /// format is an optional parameter and never a hard failure.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("card") => Self::Card,
            _ => Self::Carousel,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Carousel => "carousel",
        }
    }
}

/// Renders article sequences into the static HTML widgets.
pub struct Renderer {
    header_suffix: String,
}

impl Renderer {
    pub fn new(header_suffix: impl Into<String>) -> Self {
        Self {
            header_suffix: header_suffix.into(),
        }
    }

    /// Render `articles` in the requested format. Either the full widget is
    /// produced or a render error is returned; never a partial fragment.
    pub fn render(
        &self,
        format: DisplayFormat,
        topic: &str,
        articles: &[Article],
    ) -> McpResult<String> {
        match format {
            DisplayFormat::Card => self.render_card(articles),
            DisplayFormat::Carousel => self.render_carousel(topic, articles),
        }
    }

    // Card shows only the first article of the sequence.
    fn render_card(&self, articles: &[Article]) -> McpResult<String> {
        let Some(article) = articles.first() else {
            return Template::parse(template::NO_RESULTS_CARD)?.render(&[]);
        };

        let image = image_block(article);
        let timestamp = article.display_time();

        Template::parse(template::NEWS_CARD)?.render(&[
            ("image", SlotValue::Markup(&image)),
            ("title", SlotValue::Text(&article.title)),
            ("source", SlotValue::Text(&article.source)),
            ("timestamp", SlotValue::Text(&timestamp)),
            ("summary", SlotValue::Text(&article.summary)),
            ("url", SlotValue::Text(&article.url)),
        ])
    }

    fn render_carousel(&self, topic: &str, articles: &[Article]) -> McpResult<String> {
        if articles.is_empty() {
            return Template::parse(template::NO_RESULTS_CAROUSEL)?.render(&[]);
        }

        let item_template = Template::parse(template::CAROUSEL_ITEM)?;
        let mut items = String::new();
        for article in articles {
            let image = image_block(article);
            let timestamp = article.display_time();

            items.push_str(&item_template.render(&[
                ("image", SlotValue::Markup(&image)),
                ("title", SlotValue::Text(&article.title)),
                ("source", SlotValue::Text(&article.source)),
                ("timestamp", SlotValue::Text(&timestamp)),
                ("summary", SlotValue::Text(&article.summary)),
                ("url", SlotValue::Text(&article.url)),
            ])?);
        }

        let header = format!("{} {}", topic, self.header_suffix);

        Template::parse(template::NEWS_CAROUSEL)?.render(&[
            ("header", SlotValue::Text(&header)),
            ("items", SlotValue::Markup(&items)),
        ])
    }
}

// The image slot takes renderer-built markup: an <img> with escaped
// attributes, or a neutral placeholder when the article has no image.
fn image_block(article: &Article) -> String {
    match &article.image_url {
        Some(url) => format!(
            r#"<img class="news-image" src="{}" alt="{}">"#,
            escape_html(url),
            escape_html(&article.title)
        ),
        None => r#"<div class="news-image-placeholder" aria-hidden="true"></div>"#.to_string(),
    }
}
