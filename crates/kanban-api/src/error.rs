use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kanban_db::DbError;
use kanban_types::ValidationErrors;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("spawn_blocking join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Db(DbError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not_found", "entity": entity, "id": id })),
            )
                .into_response(),
            ApiError::Db(DbError::Validation(errors)) | ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "validation", "fields": errors.errors })),
            )
                .into_response(),
            other => {
                error!("{}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal" })),
                )
                    .into_response()
            }
        }
    }
}
