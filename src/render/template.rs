use crate::error::{McpError, McpResult};

use super::escape::escape_html;

// Static template assets, embedded at compile time.
pub const NEWS_CARD: &str = include_str!("../../assets/templates/news_card.html");
pub const NEWS_CAROUSEL: &str = include_str!("../../assets/templates/news_carousel.html");
pub const CAROUSEL_ITEM: &str = include_str!("../../assets/templates/carousel_item.html");
pub const NO_RESULTS_CARD: &str = include_str!("../../assets/templates/no_results_card.html");
pub const NO_RESULTS_CAROUSEL: &str =
    include_str!("../../assets/templates/no_results_carousel.html");

/// A value bound to a template slot.
///
/// `Text` is HTML-escaped when substituted; `Markup` is inserted verbatim
/// and is reserved for fragments the renderer itself assembled from
/// already-escaped pieces. There is no way to put raw article data into a
/// slot unescaped.
pub enum SlotValue<'a> {
    Text(&'a str),
    Markup(&'a str),
}

enum Segment<'a> {
    Literal(&'a str),
    Slot(&'a str),
}

/// A parsed template: literal runs interleaved with named `{{slot}}` markers.
///
/// Substituted values are never re-scanned for markers, so article text
/// containing `{{...}}` stays literal.
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    /// Parse a template body. A malformed marker is a render error, not a
    /// silently broken page.
    pub fn parse(body: &'a str) -> McpResult<Self> {
        let mut segments = Vec::new();
        let mut rest = body;

        while let Some(start) = rest.find("{{") {
            let (literal, tail) = rest.split_at(start);
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal));
            }

            let tail = &tail[2..];
            let end = tail.find("}}").ok_or_else(|| {
                McpError::Render("unterminated slot marker in template".to_string())
            })?;

            let name = &tail[..end];
            if name.is_empty() || !name.bytes().all(|b| b.is_ascii_lowercase() || b == b'_') {
                return Err(McpError::Render(format!(
                    "malformed slot name '{{{{{}}}}}'",
                    name
                )));
            }

            segments.push(Segment::Slot(name));
            rest = &tail[end + 2..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }

        Ok(Self { segments })
    }

    /// Substitute every slot from `values`. A slot with no binding fails the
    /// whole render; nothing partial is returned.
    pub fn render(&self, values: &[(&str, SlotValue<'_>)]) -> McpResult<String> {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(name) => {
                    let value = values
                        .iter()
                        .find(|entry| entry.0 == *name)
                        .map(|entry| &entry.1)
                        .ok_or_else(|| {
                            McpError::Render(format!(
                                "template slot '{{{{{}}}}}' was never filled",
                                name
                            ))
                        })?;

                    match value {
                        SlotValue::Text(raw) => out.push_str(&escape_html(raw)),
                        SlotValue::Markup(html) => out.push_str(html),
                    }
                }
            }
        }

        Ok(out)
    }
}
