use chrono::{DateTime, Utc};

/// Well-known object key the feed is published under.
pub const FEED_KEY: &str = "podcast_feed.xml";

/// Feed-level metadata. Fixed for the single feed this service publishes.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMetadata {
    pub title: String,
    pub description: String,
    pub link: String,
    pub language: String,
    pub author: String,
    pub category: String,
}

impl Default for FeedMetadata {
    fn default() -> Self {
        Self {
            title: "ArticlePod Feed".to_string(),
            description: "Audio versions of your favorite articles".to_string(),
            link: "https://articlecast.dev/".to_string(),
            language: "en".to_string(),
            author: "ArticlePod".to_string(),
            category: "Technology".to_string(),
        }
    }
}

/// One published episode.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub enclosure_url: String,
    pub enclosure_type: String,
    pub enclosure_length: u64,
    pub published: DateTime<Utc>,
}

/// The aggregated podcast feed. Entries stay in publish order; assembling
/// appends rather than replaces.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    pub metadata: FeedMetadata,
    pub entries: Vec<FeedEntry>,
}

impl FeedDocument {
    pub fn new(metadata: FeedMetadata) -> Self {
        Self {
            metadata,
            entries: Vec::new(),
        }
    }
}
