pub mod backends;
pub mod blob;

pub use backends::{MemoryArticleRepository, SqliteArticleRepository};
pub use blob::{MemoryBlobStore, S3BlobStore};

pub mod prelude {
    pub use super::backends::*;
    pub use super::blob::*;
    pub use ac_core::{ArticleRepository, BlobStore};
}
