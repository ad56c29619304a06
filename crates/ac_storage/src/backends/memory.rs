use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use ac_core::{ArticleRecord, ArticleRepository, NewArticle, Result};

/// In-memory article repository, used for tests and local development.
#[derive(Default)]
pub struct MemoryArticleRepository {
    articles: RwLock<Vec<ArticleRecord>>,
}

impl MemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleRepository for MemoryArticleRepository {
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
        self.articles.write().await.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ArticleRecord>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<ArticleRecord>> {
        let articles = self.articles.read().await;
        let mut all = articles.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.articles.write().await.retain(|a| a.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_repository_roundtrip() {
        let repo = MemoryArticleRepository::new();
        let created = repo
            .create(NewArticle {
                user_id: None,
                title: "Test Article".to_string(),
                content: None,
                content_url: None,
                speech_model: "en-US-Standard-B".to_string(),
                audio_url: None,
            })
            .await
            .unwrap();

        assert!(repo.get(created.id).await.unwrap().is_some());
        assert_eq!(repo.list().await.unwrap().len(), 1);

        repo.delete(created.id).await.unwrap();
        assert!(repo.get(created.id).await.unwrap().is_none());
    }
}
