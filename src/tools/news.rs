use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::Tool;
use crate::config::Config;
use crate::error::{McpError, McpResult};
use crate::news::NewsSource;
use crate::render::{DisplayFormat, Renderer};
use crate::utils::{normalize_limit, parse_params};

pub struct GetNewsTool {
    source: Arc<NewsSource>,
    renderer: Renderer,
    default_limit: usize,
}

impl GetNewsTool {
    pub fn new(source: Arc<NewsSource>, config: &Config) -> Self {
        Self {
            source,
            renderer: Renderer::new(config.news.header_suffix.clone()),
            default_limit: config.news.default_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GetNewsParams {
    topic: String,
    // Kept as raw values: malformed optional parameters are normalized to
    // their defaults, never rejected.
    #[serde(default)]
    format: Option<Value>,
    #[serde(default)]
    limit: Option<Value>,
}

#[async_trait]
impl Tool for GetNewsTool {
    fn description(&self) -> &str {
        "Get news articles in carousel/card format"
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params: GetNewsParams = parse_params(params)?;

        let topic = params.topic.trim();
        if topic.is_empty() {
            return Err(McpError::InvalidParameter(
                "topic must be a non-empty string".to_string(),
            ));
        }

        let format = DisplayFormat::parse(params.format.as_ref().and_then(Value::as_str));
        let limit = normalize_limit(params.limit.as_ref(), self.default_limit, self.source.len());

        let articles = self.source.select(topic, limit);
        let html = self.renderer.render(format, topic, &articles)?;

        Ok(Value::String(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::Article;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tool() -> GetNewsTool {
        GetNewsTool::new(Arc::new(NewsSource::builtin()), &Config::default())
    }

    fn tool_with(articles: Vec<Article>) -> GetNewsTool {
        GetNewsTool::new(Arc::new(NewsSource::new(articles)), &Config::default())
    }

    fn html(result: McpResult<Value>) -> String {
        match result.unwrap() {
            Value::String(html) => html,
            other => panic!("expected HTML string, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_topic_is_invalid_parameter() {
        for topic in ["", "   "] {
            let result = tool().execute(json!({"topic": topic})).await;
            assert!(matches!(result, Err(McpError::InvalidParameter(_))));
        }
    }

    #[tokio::test]
    async fn test_missing_topic_is_invalid_parameter() {
        let result = tool().execute(json!({"format": "card"})).await;
        assert!(matches!(result, Err(McpError::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn test_non_string_topic_is_invalid_parameter() {
        let result = tool().execute(json!({"topic": 42})).await;
        assert!(matches!(result, Err(McpError::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn test_default_limit_yields_five_carousel_items() {
        let output = html(tool().execute(json!({"topic": "zzz-no-match"})).await);
        assert_eq!(output.matches("carousel-item").count(), 5);
    }

    #[tokio::test]
    async fn test_limit_above_set_size_is_clamped() {
        let output = html(
            tool()
                .execute(json!({"topic": "zzz-no-match", "limit": 50}))
                .await,
        );
        assert_eq!(
            output.matches("carousel-item").count(),
            NewsSource::builtin().len()
        );
    }

    #[tokio::test]
    async fn test_malformed_limit_falls_back_to_default() {
        for limit in [json!(0), json!(-3), json!(2.5), json!("ten")] {
            let output = html(
                tool()
                    .execute(json!({"topic": "zzz-no-match", "limit": limit}))
                    .await,
            );
            assert_eq!(output.matches("carousel-item").count(), 5);
        }
    }

    #[tokio::test]
    async fn test_unknown_format_falls_back_to_carousel() {
        let output = html(
            tool()
                .execute(json!({"topic": "space", "format": "billboard"}))
                .await,
        );
        assert!(output.contains("news-carousel"));
    }

    #[tokio::test]
    async fn test_omitted_format_equals_explicit_carousel() {
        let omitted = html(tool().execute(json!({"topic": "space", "limit": 3})).await);
        let explicit = html(
            tool()
                .execute(json!({"topic": "space", "format": "carousel", "limit": 3}))
                .await,
        );
        assert_eq!(omitted, explicit);
    }

    #[tokio::test]
    async fn test_idempotent_byte_identical_output() {
        let args = json!({"topic": "technology", "format": "carousel", "limit": 4});
        let first = html(tool().execute(args.clone()).await);
        let second = html(tool().execute(args).await);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_technology_card_matches_a_technology_article() {
        let output = html(
            tool()
                .execute(json!({"topic": "technology", "format": "card", "limit": 1}))
                .await,
        );

        assert_eq!(output.matches("news-card-title").count(), 1);

        let matched = NewsSource::builtin()
            .select("technology", 1)
            .into_iter()
            .next()
            .unwrap();
        assert!(output.contains(&matched.title));
        assert!(
            matched.title.to_lowercase().contains("technology")
                || matched.summary.to_lowercase().contains("technology")
        );
    }

    #[tokio::test]
    async fn test_unmatched_topic_gets_fallback_carousel() {
        let output = html(
            tool()
                .execute(json!({"topic": "zzz-no-match", "format": "carousel", "limit": 3}))
                .await,
        );
        assert_eq!(output.matches("carousel-item").count(), 3);
        assert!(!output.contains("news-carousel-empty"));
    }

    #[tokio::test]
    async fn test_script_in_article_data_only_appears_escaped() {
        let hostile = Article {
            title: "<script>alert('pwn')</script>".to_string(),
            source: "Sketchy Wire".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 6, 11, 0, 0, 0).unwrap(),
            summary: "\"quoted\" & <b>bold</b>".to_string(),
            url: "https://example.com/hostile".to_string(),
            image_url: None,
        };

        for format in ["card", "carousel"] {
            let output = html(
                tool_with(vec![hostile.clone()])
                    .execute(json!({"topic": "script", "format": format}))
                    .await,
            );
            assert!(!output.contains("<script>"));
            assert!(output.contains("&lt;script&gt;"));
            assert!(output.contains("&quot;quoted&quot; &amp; &lt;b&gt;bold&lt;/b&gt;"));
        }
    }

    #[tokio::test]
    async fn test_empty_source_renders_no_results() {
        let output = html(
            tool_with(vec![])
                .execute(json!({"topic": "anything", "format": "card"}))
                .await,
        );
        assert!(output.contains("news-card-empty"));
    }
}
