use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] ac_core::Error),

    #[error("{0}")]
    NotFound(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => match e {
                ac_core::Error::InvalidUrl(_) | ac_core::Error::Extraction(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ac_core::Error::NotFound(_) => StatusCode::NOT_FOUND,
                ac_core::Error::Synthesis(_)
                | ac_core::Error::Storage(_)
                | ac_core::Error::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_for(error: ac_core::Error) -> StatusCode {
        ApiError::from(error).into_response().status()
    }

    #[test]
    fn test_client_errors_map_to_unprocessable() {
        assert_eq!(
            status_for(ac_core::Error::Extraction("empty".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(ac_core::Error::InvalidUrl("nope".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_missing_article_maps_to_not_found() {
        assert_eq!(
            status_for(ac_core::Error::NotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_backend_failures_map_to_server_error() {
        assert_eq!(
            status_for(ac_core::Error::Synthesis("quota".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(ac_core::Error::Storage("upload".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(ac_core::Error::Persistence("insert".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
