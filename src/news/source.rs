use chrono::{DateTime, TimeZone, Utc};

use super::Article;

/// Immutable article set backing the `get_news` tool.
///
/// Constructed once at startup and shared behind an `Arc`; requests only
/// read it, so no synchronization is needed.
#[derive(Debug, Clone)]
pub struct NewsSource {
    articles: Vec<Article>,
}

impl NewsSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// The built-in mock fixture used when no real news provider is wired up.
    ///
    /// Timestamps are fixed so identical requests produce byte-identical
    /// output.
    pub fn builtin() -> Self {
        Self::new(vec![
            Article {
                title: "Quantum Computing Startup Raises $200M to Scale Error-Corrected Chips"
                    .to_string(),
                source: "Tech Daily".to_string(),
                published_at: ts(2025, 6, 11, 9, 30),
                summary: "The funding round bets that error-corrected technology will bring \
                          fault-tolerant quantum machines to market within five years."
                    .to_string(),
                url: "https://example.com/news/quantum-funding".to_string(),
                image_url: Some("https://example.com/images/quantum-chip.jpg".to_string()),
            },
            Article {
                title: "Breakthrough Battery Technology Promises Week-Long Phone Charge"
                    .to_string(),
                source: "Gadget Week".to_string(),
                published_at: ts(2025, 6, 11, 8, 15),
                summary: "Solid-state cells out of a Kyoto lab survive a thousand charge cycles \
                          with almost no capacity loss."
                    .to_string(),
                url: "https://example.com/news/battery-breakthrough".to_string(),
                image_url: Some("https://example.com/images/battery.jpg".to_string()),
            },
            Article {
                title: "Record Ocean Temperatures Push Coral Reefs Toward Mass Bleaching"
                    .to_string(),
                source: "World News".to_string(),
                published_at: ts(2025, 6, 11, 7, 0),
                summary: "Climate scientists warn that this year's marine heatwave is the most \
                          widespread ever observed."
                    .to_string(),
                url: "https://example.com/news/coral-bleaching".to_string(),
                image_url: Some("https://example.com/images/reef.jpg".to_string()),
            },
            Article {
                title: "Markets Rally as Central Banks Signal End of Tightening Cycle".to_string(),
                source: "Financial Post".to_string(),
                published_at: ts(2025, 6, 10, 21, 45),
                summary: "Equities closed at a six-month high after policymakers hinted that \
                          rate cuts could arrive before autumn."
                    .to_string(),
                url: "https://example.com/news/markets-rally".to_string(),
                image_url: None,
            },
            Article {
                title: "Private Lander Touches Down Near Lunar South Pole".to_string(),
                source: "Orbital Report".to_string(),
                published_at: ts(2025, 6, 10, 18, 20),
                summary: "The mission will spend two weeks prospecting for water ice in \
                          permanently shadowed craters."
                    .to_string(),
                url: "https://example.com/news/lunar-landing".to_string(),
                image_url: Some("https://example.com/images/lander.jpg".to_string()),
            },
            Article {
                title: "Universal Flu Vaccine Clears Late-Stage Trials".to_string(),
                source: "Health Desk".to_string(),
                published_at: ts(2025, 6, 10, 14, 5),
                summary: "A single shot protected against every circulating strain tested, \
                          raising hopes of retiring the annual reformulation cycle."
                    .to_string(),
                url: "https://example.com/news/flu-vaccine".to_string(),
                image_url: Some("https://example.com/images/vaccine.jpg".to_string()),
            },
        ])
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Select up to `limit` articles relevant to `topic`.
    ///
    /// An article matches when the topic appears case-insensitively in its
    /// title or summary. Source order is preserved among matches. When
    /// nothing matches, the full set (truncated to `limit`) is returned
    /// instead of an empty result.
    pub fn select(&self, topic: &str, limit: usize) -> Vec<Article> {
        let needle = topic.to_lowercase();

        let matches: Vec<&Article> = self
            .articles
            .iter()
            .filter(|article| {
                article.title.to_lowercase().contains(&needle)
                    || article.summary.to_lowercase().contains(&needle)
            })
            .collect();

        let selected = if matches.is_empty() {
            // Graceful degradation: an unmatched topic still gets content
            self.articles.iter().collect()
        } else {
            matches
        };

        selected.into_iter().take(limit).cloned().collect()
    }
}

fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
