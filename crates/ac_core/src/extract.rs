use async_trait::async_trait;

use crate::types::ExtractedArticle;
use crate::Result;

#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// Fetches a page and extracts its plain-text title and body.
    async fn extract(&self, url: &str) -> Result<ExtractedArticle>;
}
