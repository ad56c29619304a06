use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use ac_core::{BlobStore, Error, Result};

/// In-memory blob store, used for tests and local development.
pub struct MemoryBlobStore {
    inner: Arc<dyn ObjectStore>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(InMemory::new()),
        }
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<String> {
        let path = StorePath::from(key);
        self.inner
            .put(&path, PutPayload::from(bytes))
            .await
            .map_err(|e| Error::Storage(format!("upload of {} failed: {}", key, e)))?;

        Ok(self.url_for(key))
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let path = StorePath::from(key);
        let result = self
            .inner
            .get(&path)
            .await
            .map_err(|e| Error::Storage(format!("download of {} failed: {}", key, e)))?;

        result
            .bytes()
            .await
            .map_err(|e| Error::Storage(format!("download of {} failed: {}", key, e)))
    }

    fn url_for(&self, key: &str) -> String {
        format!("memory://{}", key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryBlobStore::new();
        let url = store
            .put("audio/test.mp3", Bytes::from_static(b"mp3 bytes"))
            .await
            .unwrap();
        assert_eq!(url, "memory://audio/test.mp3");

        let bytes = store.get("audio/test.mp3").await.unwrap();
        assert_eq!(&bytes[..], b"mp3 bytes");
    }

    #[tokio::test]
    async fn test_get_missing_key_is_storage_error() {
        let store = MemoryBlobStore::new();
        let result = store.get("nope.mp3").await;
        assert!(matches!(result, Err(Error::Storage(_))));
    }
}
