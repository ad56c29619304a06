use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("synthesis error: {0}")]
    Synthesis(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("article not found: {0}")]
    NotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, Error>;
