use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use kanban_types::api::CreateCommentRequest;

use crate::error::ApiError;
use crate::state::{AppState, blocking};

pub async fn create_comment(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = blocking(&state, move |db| db.create_comment(&card_id, &req)).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn drop_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dropped = blocking(&state, move |db| db.drop_comment(&comment_id)).await?;
    Ok(Json(dropped))
}
