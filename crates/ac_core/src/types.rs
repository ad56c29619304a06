use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted audio article. Immutable once created, except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub content: Option<String>,
    pub content_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub speech_model: String,
    pub audio_url: Option<String>,
}

/// Insert-side shape of an article. The repository assigns `id` and
/// `created_at` when the row is written.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub user_id: Option<Uuid>,
    pub title: String,
    pub content: Option<String>,
    pub content_url: Option<String>,
    pub speech_model: String,
    pub audio_url: Option<String>,
}

/// Plain-text result of fetching and extracting a web page.
#[derive(Debug, Clone)]
pub struct ExtractedArticle {
    pub title: String,
    pub text: String,
}
