use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single news article. Immutable once constructed; the mock fixture and
/// the renderer only ever read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub summary: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Article {
    /// Publication time as rendered in the source/timestamp line.
    pub fn display_time(&self) -> String {
        self.published_at.format("%b %d, %H:%M UTC").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_time_is_deterministic() {
        let article = Article {
            title: "Title".to_string(),
            source: "Source".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 6, 11, 9, 30, 0).unwrap(),
            summary: String::new(),
            url: "https://example.com".to_string(),
            image_url: None,
        };

        assert_eq!(article.display_time(), "Jun 11, 09:30 UTC");
        assert_eq!(article.display_time(), article.display_time());
    }
}
