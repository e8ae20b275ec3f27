use bullion_model::news::NewsArticle;
use chrono::{DateTime, Duration, Utc};

/// (id, title, summary, source, hours before now)
const DEMO_ARTICLES: [(&str, &str, &str, &str, i64); 3] = [
    (
        "1",
        "Gold Prices Surge Amid Global Economic Uncertainty",
        "Investors flock to safe-haven assets as market volatility increases.",
        "Market Watch",
        0,
    ),
    (
        "2",
        "Silver Demand Rises with Green Energy Transition",
        "Industrial demand for silver increases due to solar panel production.",
        "Bloomberg",
        1,
    ),
    (
        "3",
        "Central Banks Continue Gold Buying Spree",
        "Global central banks add to gold reserves for the third consecutive quarter.",
        "Reuters",
        2,
    ),
];

/// Canned headlines, newest first, published relative to `now`.
pub fn demo_market_news(now: DateTime<Utc>) -> Vec<NewsArticle> {
    DEMO_ARTICLES
        .iter()
        .map(|&(id, title, summary, source, hours_ago)| NewsArticle {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            url: "#".to_string(),
            source: source.to_string(),
            published_at: now - Duration::hours(hours_ago),
            image_url: None,
        })
        .collect()
}
