use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/articles/",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/articles/:id",
            get(handlers::get_article).delete(handlers::delete_article),
        )
        .route("/articles/test-voice", post(handlers::test_voice))
        .route("/articles/:id/publish", post(handlers::publish_article))
        .route("/feed", get(handlers::get_feed))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use ac_core::{ArticleRecord, Error, Result};
}
