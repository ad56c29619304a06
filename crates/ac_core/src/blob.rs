use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

/// Durable key-to-URL blob storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads a blob and returns its public URL.
    async fn put(&self, key: &str, bytes: Bytes) -> Result<String>;

    /// Downloads a blob by key.
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// The public URL a blob is served from.
    fn url_for(&self, key: &str) -> String;
}
