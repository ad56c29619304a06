pub mod memory;
pub mod sqlite;

pub use memory::MemoryArticleRepository;
pub use sqlite::SqliteArticleRepository;
