use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::debug;

use ac_core::{ArticleRecord, BlobStore, Result};

use crate::document::{FeedDocument, FeedEntry, FeedMetadata, FEED_KEY};
use crate::rss;

const DESCRIPTION_LIMIT: usize = 500;

/// Maintains the single podcast feed as a growing list of episodes.
///
/// Every publish reads the current document, appends one entry and rewrites
/// the whole object. Two concurrent publishes race on that read-modify-write
/// and the later write wins; there is no lock or version check.
pub struct FeedAssembler {
    blobs: Arc<dyn BlobStore>,
}

impl FeedAssembler {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Appends one episode for `article` and republishes the feed.
    /// Returns the feed's public URL.
    pub async fn publish(&self, article: &ArticleRecord) -> Result<String> {
        let mut document = self.load_or_create().await;
        document.entries.push(entry_for(article));

        let xml = rss::to_rss(&document)?;
        self.blobs.put(FEED_KEY, Bytes::from(xml)).await
    }

    /// A missing or unparsable feed is an expected initial state, not a
    /// fault, so both cases fall back to a fresh document.
    async fn load_or_create(&self) -> FeedDocument {
        match self.blobs.get(FEED_KEY).await {
            Ok(bytes) => match std::str::from_utf8(&bytes).ok().and_then(rss::parse_rss) {
                Some(document) => document,
                None => {
                    debug!("existing feed is unparsable, starting fresh");
                    FeedDocument::new(FeedMetadata::default())
                }
            },
            Err(_) => {
                debug!("no existing feed found, creating new one");
                FeedDocument::new(FeedMetadata::default())
            }
        }
    }
}

fn entry_for(article: &ArticleRecord) -> FeedEntry {
    FeedEntry {
        id: article.id.to_string(),
        title: article.title.clone(),
        description: truncate_description(article.content.as_deref().unwrap_or_default()),
        link: article.content_url.clone(),
        enclosure_url: article.audio_url.clone().unwrap_or_default(),
        enclosure_type: "audio/mpeg".to_string(),
        // Byte size of the audio object is not tracked; 0 means unknown.
        enclosure_length: 0,
        published: Utc::now(),
    }
}

fn truncate_description(content: &str) -> String {
    if content.chars().count() > DESCRIPTION_LIMIT {
        let truncated: String = content.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", truncated)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_storage::MemoryBlobStore;
    use chrono::Utc;
    use uuid::Uuid;

    fn record(title: &str, content: &str, audio_url: &str) -> ArticleRecord {
        ArticleRecord {
            id: Uuid::new_v4(),
            user_id: None,
            title: title.to_string(),
            content: Some(content.to_string()),
            content_url: Some("https://example.com/a".to_string()),
            created_at: Utc::now(),
            speech_model: "en-US-Standard-B".to_string(),
            audio_url: Some(audio_url.to_string()),
        }
    }

    #[test]
    fn test_short_description_is_verbatim() {
        assert_eq!(truncate_description("short text"), "short text");

        let exactly_500 = "x".repeat(500);
        assert_eq!(truncate_description(&exactly_500), exactly_500);
    }

    #[test]
    fn test_long_description_is_truncated_with_marker() {
        let long = "y".repeat(501);
        let description = truncate_description(&long);
        assert_eq!(description.chars().count(), 503);
        assert!(description.ends_with("..."));
        assert!(description.starts_with("yyy"));
    }

    #[tokio::test]
    async fn test_publish_appends_in_call_order() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let assembler = FeedAssembler::new(blobs.clone());

        let first = record("First", "first content", "memory://audio/first.mp3");
        let second = record("Second", "second content", "memory://audio/second.mp3");

        let feed_url = assembler.publish(&first).await.unwrap();
        assert_eq!(feed_url, format!("memory://{}", FEED_KEY));
        assembler.publish(&second).await.unwrap();

        let xml = blobs.get(FEED_KEY).await.unwrap();
        let document = rss::parse_rss(std::str::from_utf8(&xml).unwrap()).unwrap();

        assert_eq!(document.entries.len(), 2);
        assert_eq!(document.entries[0].title, "First");
        assert_eq!(document.entries[0].enclosure_url, "memory://audio/first.mp3");
        assert_eq!(document.entries[1].title, "Second");
        assert_eq!(
            document.entries[1].enclosure_url,
            "memory://audio/second.mp3"
        );
    }

    #[tokio::test]
    async fn test_publish_does_not_deduplicate() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let assembler = FeedAssembler::new(blobs.clone());

        let article = record("Same", "same content", "memory://audio/same.mp3");
        assembler.publish(&article).await.unwrap();
        assembler.publish(&article).await.unwrap();

        let xml = blobs.get(FEED_KEY).await.unwrap();
        let document = rss::parse_rss(std::str::from_utf8(&xml).unwrap()).unwrap();
        assert_eq!(document.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_unparsable_feed_starts_fresh() {
        let blobs = Arc::new(MemoryBlobStore::new());
        blobs
            .put(FEED_KEY, Bytes::from_static(b"<<< definitely not xml"))
            .await
            .unwrap();

        let assembler = FeedAssembler::new(blobs.clone());
        let article = record("Fresh", "fresh content", "memory://audio/fresh.mp3");
        assembler.publish(&article).await.unwrap();

        let xml = blobs.get(FEED_KEY).await.unwrap();
        let document = rss::parse_rss(std::str::from_utf8(&xml).unwrap()).unwrap();
        assert_eq!(document.entries.len(), 1);
        assert_eq!(document.entries[0].title, "Fresh");
    }
}
