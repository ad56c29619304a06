use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ac_core::{ArticleRecord, Error};
use ac_feed::FEED_KEY;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateArticle {
    pub url: String,
    #[serde(rename = "textToSpeechModel")]
    pub text_to_speech_model: String,
}

#[derive(Debug, Deserialize)]
pub struct TestVoice {
    pub voice: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub feed_url: String,
}

pub async fn health() -> &'static str {
    "Health check complete"
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ArticleRecord>>> {
    Ok(Json(state.articles.list().await?))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ArticleRecord>> {
    let record = state.articles.get(id).await?.ok_or(Error::NotFound(id))?;
    Ok(Json(record))
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateArticle>,
) -> ApiResult<(StatusCode, Json<ArticleRecord>)> {
    let record = state
        .pipeline
        .ingest(&payload.url, &payload.text_to_speech_model)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ArticleRecord>> {
    let record = state.pipeline.remove(id).await?;
    Ok(Json(record))
}

pub async fn test_voice(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TestVoice>,
) -> ApiResult<impl IntoResponse> {
    let audio = state
        .pipeline
        .preview_voice(&payload.voice, &payload.text)
        .await?;
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}

pub async fn publish_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PublishResponse>> {
    let record = state.articles.get(id).await?.ok_or(Error::NotFound(id))?;
    let feed_url = state.feed.publish(&record).await?;
    Ok(Json(PublishResponse { feed_url }))
}

pub async fn get_feed(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let xml = state
        .blobs
        .get(FEED_KEY)
        .await
        .map_err(|_| ApiError::NotFound("no feed has been published yet".to_string()))?;
    Ok(([(header::CONTENT_TYPE, "application/rss+xml")], xml))
}
