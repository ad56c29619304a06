use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{ArticleRecord, NewArticle};
use crate::Result;

/// Durable CRUD over article records.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Persists an article and returns the stored record.
    async fn create(&self, article: NewArticle) -> Result<ArticleRecord>;

    /// Looks up one record by id.
    async fn get(&self, id: Uuid) -> Result<Option<ArticleRecord>>;

    /// All persisted records, newest first.
    async fn list(&self) -> Result<Vec<ArticleRecord>>;

    /// Removes a record by id.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
