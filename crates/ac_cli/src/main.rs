use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ac_core::{ArticleRepository, BlobStore};
use ac_extract::PageExtractor;
use ac_feed::FeedAssembler;
use ac_pipeline::IngestionPipeline;
use ac_speech::GoogleSynthesizer;
use ac_storage::{MemoryArticleRepository, MemoryBlobStore, S3BlobStore, SqliteArticleRepository};
use ac_web::{create_app, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Article repository backend: sqlite or memory
    #[arg(long, default_value = "sqlite")]
    storage: String,

    /// Path of the sqlite database file
    #[arg(long, default_value = "articles.db")]
    db_path: PathBuf,

    /// Blob store backend: s3 or memory
    #[arg(long, default_value = "s3")]
    blobs: String,
}

async fn create_repository(cli: &Cli) -> anyhow::Result<Arc<dyn ArticleRepository>> {
    match cli.storage.as_str() {
        "sqlite" => Ok(Arc::new(
            SqliteArticleRepository::connect(&cli.db_path).await?,
        )),
        "memory" => Ok(Arc::new(MemoryArticleRepository::new())),
        other => anyhow::bail!("unknown storage backend: {}", other),
    }
}

fn create_blob_store(cli: &Cli) -> anyhow::Result<Arc<dyn BlobStore>> {
    match cli.blobs.as_str() {
        "s3" => {
            let bucket = std::env::var("AWS_BUCKET_NAME").context("AWS_BUCKET_NAME is not set")?;
            let region = std::env::var("AWS_REGION").context("AWS_REGION is not set")?;
            let access_key_id =
                std::env::var("AWS_ACCESS_KEY_ID").context("AWS_ACCESS_KEY_ID is not set")?;
            let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
                .context("AWS_SECRET_ACCESS_KEY is not set")?;
            Ok(Arc::new(S3BlobStore::new(
                &bucket,
                &region,
                &access_key_id,
                &secret_access_key,
            )?))
        }
        "memory" => Ok(Arc::new(MemoryBlobStore::new())),
        other => anyhow::bail!("unknown blob backend: {}", other),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let articles = create_repository(&cli).await?;
    info!("💾 Article repository initialized (using {})", cli.storage);

    let blobs = create_blob_store(&cli)?;
    info!("🪣 Blob store initialized (using {})", cli.blobs);

    let api_key =
        std::env::var("GOOGLE_TTS_API_KEY").context("GOOGLE_TTS_API_KEY is not set")?;
    let synthesizer = Arc::new(GoogleSynthesizer::new(&api_key)?);
    info!("🔊 Speech synthesizer initialized");

    let pipeline = IngestionPipeline::new(
        Arc::new(PageExtractor::new()),
        synthesizer,
        blobs.clone(),
        articles.clone(),
    );
    let feed = FeedAssembler::new(blobs.clone());

    let app = create_app(AppState {
        pipeline,
        articles,
        feed,
        blobs,
    });

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!("🚀 Listening on {}", cli.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
