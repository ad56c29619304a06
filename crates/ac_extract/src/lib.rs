pub mod page;

pub use page::PageExtractor;

pub mod prelude {
    pub use super::PageExtractor;
    pub use ac_core::{ArticleExtractor, ExtractedArticle, Result};
}
