use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

use ac_core::{ArticleRecord, ArticleRepository, Error, NewArticle, Result};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        title TEXT NOT NULL,
        content TEXT,
        content_url TEXT,
        created_at TEXT NOT NULL,
        speech_model TEXT NOT NULL,
        audio_url TEXT
    )
    "#,
    // Add future migrations here
];

pub struct SqliteArticleRepository {
    pool: SqlitePool,
}

impl SqliteArticleRepository {
    pub async fn connect(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Persistence(format!("failed to create database directory: {}", e))
            })?;
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
            .await
            .map_err(|e| Error::Persistence(format!("failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Persistence(format!("failed to run migration {}: {}", i, e)))?;
        }

        debug!("connected to sqlite database at {}", db_path.display());
        Ok(Self { pool })
    }
}

fn record_from_row(row: &SqliteRow) -> Result<ArticleRecord> {
    let id: String = row.get("id");
    let id = Uuid::parse_str(&id)
        .map_err(|e| Error::Persistence(format!("invalid article id in row: {}", e)))?;

    let user_id = row
        .get::<Option<String>, _>("user_id")
        .map(|s| Uuid::parse_str(&s))
        .transpose()
        .map_err(|e| Error::Persistence(format!("invalid user id in row: {}", e)))?;

    let created_at: String = row.get("created_at");
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Persistence(format!("invalid timestamp in row: {}", e)))?
        .with_timezone(&Utc);

    Ok(ArticleRecord {
        id,
        user_id,
        title: row.get("title"),
        content: row.get("content"),
        content_url: row.get("content_url"),
        created_at,
        speech_model: row.get("speech_model"),
        audio_url: row.get("audio_url"),
    })
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<ArticleRecord> {
        let record = ArticleRecord {
            id: Uuid::new_v4(),
            user_id: article.user_id,
            title: article.title,
            content: article.content,
            content_url: article.content_url,
            created_at: Utc::now(),
            speech_model: article.speech_model,
            audio_url: article.audio_url,
        };

        sqlx::query(
            r#"
            INSERT INTO articles
            (id, user_id, title, content, content_url, created_at, speech_model, audio_url)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.user_id.map(|u| u.to_string()))
        .bind(&record.title)
        .bind(record.content.as_deref())
        .bind(record.content_url.as_deref())
        .bind(record.created_at.to_rfc3339())
        .bind(&record.speech_model)
        .bind(record.audio_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Persistence(format!("failed to store article: {}", e)))?;

        debug!("stored article {}", record.id);
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ArticleRecord>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Persistence(format!("failed to load article: {}", e)))?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<ArticleRecord>> {
        let rows = sqlx::query("SELECT * FROM articles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Persistence(format!("failed to list articles: {}", e)))?;

        rows.iter().map(record_from_row).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Persistence(format!("failed to delete article: {}", e)))?;

        debug!("deleted article {}", id);
        Ok(())
    }
}
