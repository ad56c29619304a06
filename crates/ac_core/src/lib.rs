pub mod blob;
pub mod error;
pub mod extract;
pub mod repository;
pub mod speech;
pub mod types;

pub use blob::BlobStore;
pub use error::{Error, Result};
pub use extract::ArticleExtractor;
pub use repository::ArticleRepository;
pub use speech::SpeechSynthesizer;
pub use types::{ArticleRecord, ExtractedArticle, NewArticle};
