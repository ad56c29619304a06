use std::sync::Arc;

use ac_core::{ArticleRepository, BlobStore};
use ac_feed::FeedAssembler;
use ac_pipeline::IngestionPipeline;

pub struct AppState {
    pub pipeline: IngestionPipeline,
    pub articles: Arc<dyn ArticleRepository>,
    pub feed: FeedAssembler,
    pub blobs: Arc<dyn BlobStore>,
}
