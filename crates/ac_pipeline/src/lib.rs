use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use url::Url;
use uuid::Uuid;

use ac_core::{
    ArticleExtractor, ArticleRecord, ArticleRepository, BlobStore, Error, NewArticle, Result,
    SpeechSynthesizer,
};

/// Orchestrates extraction, synthesis, upload and persistence for one
/// submitted URL.
///
/// Every external call is attempted exactly once; any failure aborts the run
/// and surfaces the originating error. A failure before the upload leaves no
/// state behind. A persistence failure after the upload leaves an orphaned
/// audio object in storage; nothing cleans those up.
pub struct IngestionPipeline {
    extractor: Arc<dyn ArticleExtractor>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    blobs: Arc<dyn BlobStore>,
    articles: Arc<dyn ArticleRepository>,
}

impl IngestionPipeline {
    pub fn new(
        extractor: Arc<dyn ArticleExtractor>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        blobs: Arc<dyn BlobStore>,
        articles: Arc<dyn ArticleRepository>,
    ) -> Self {
        Self {
            extractor,
            synthesizer,
            blobs,
            articles,
        }
    }

    /// Turns a submitted URL and voice into a persisted, audio-backed
    /// article record.
    pub async fn ingest(&self, url: &str, voice: &str) -> Result<ArticleRecord> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;

        info!("📰 Extracting article from {}", url);
        let extracted = self.extractor.extract(url).await?;
        if extracted.title.is_empty() || extracted.text.is_empty() {
            return Err(Error::Extraction(format!(
                "could not extract article content from {}",
                url
            )));
        }

        info!(
            "🔊 Synthesizing {} chars with voice {}",
            extracted.text.len(),
            voice
        );
        let audio = self.synthesizer.synthesize(&extracted.text, voice).await?;

        let key = audio_key(&extracted.title);
        info!("💾 Uploading audio as {}", key);
        let audio_url = self.blobs.put(&key, audio).await?;

        let record = self
            .articles
            .create(NewArticle {
                user_id: None,
                title: extracted.title,
                content: Some(extracted.text),
                content_url: Some(url.to_string()),
                speech_model: voice.to_string(),
                audio_url: Some(audio_url),
            })
            .await?;

        info!("✨ Article {} ingested", record.id);
        Ok(record)
    }

    /// Deletes the record. The audio object stays in storage; audio is never
    /// garbage collected.
    pub async fn remove(&self, id: Uuid) -> Result<ArticleRecord> {
        let record = self.articles.get(id).await?.ok_or(Error::NotFound(id))?;
        self.articles.delete(id).await?;
        info!("🗑 Article {} removed", id);
        Ok(record)
    }

    /// Synthesizes arbitrary text without storing or persisting anything,
    /// so a caller can audition a voice before committing to ingestion.
    pub async fn preview_voice(&self, voice: &str, text: &str) -> Result<Bytes> {
        self.synthesizer.synthesize(text, voice).await
    }
}

fn audio_key(title: &str) -> String {
    format!("article_audio_{}-{}.mp3", Uuid::new_v4(), slugify(title))
}

/// Reduces a title to a storage-key-safe slug.
fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
        if slug.len() >= 64 {
            break;
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "article".to_string()
    } else {
        slug.to_string()
    }
}
