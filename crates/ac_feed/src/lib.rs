pub mod assembler;
pub mod document;
pub mod rss;

pub use assembler::FeedAssembler;
pub use document::{FeedDocument, FeedEntry, FeedMetadata, FEED_KEY};

pub mod prelude {
    pub use super::{FeedAssembler, FeedDocument, FeedEntry, FEED_KEY};
    pub use ac_core::{BlobStore, Result};
}
