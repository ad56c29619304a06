use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use tracing::debug;

use ac_core::{BlobStore, Error, Result};

/// Audio and feed blobs on S3, addressed by public bucket URL.
pub struct S3BlobStore {
    inner: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
}

impl S3BlobStore {
    pub fn new(
        bucket: &str,
        region: &str,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Result<Self> {
        let store = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_region(region)
            .with_access_key_id(access_key_id)
            .with_secret_access_key(secret_access_key)
            .build()
            .map_err(|e| Error::Storage(format!("failed to build S3 client: {}", e)))?;

        Ok(Self {
            inner: Arc::new(store),
            bucket: bucket.to_string(),
            region: region.to_string(),
        })
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<String> {
        let path = StorePath::from(key);
        let size = bytes.len();
        self.inner
            .put(&path, PutPayload::from(bytes))
            .await
            .map_err(|e| Error::Storage(format!("upload of {} failed: {}", key, e)))?;

        debug!("uploaded {} ({} bytes) to {}", key, size, self.bucket);
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
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_format() {
        let store = S3BlobStore::new("my-bucket", "us-east-1", "key", "secret").unwrap();
        assert_eq!(
            store.url_for("podcast_feed.xml"),
            "https://my-bucket.s3.us-east-1.amazonaws.com/podcast_feed.xml"
        );
    }
}
