use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use kanban_types::validate;

use crate::error::ApiError;
use crate::state::{AppState, blocking};

pub async fn get_colors(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let colors = blocking(&state, move |db| db.get_colors(&card_id)).await?;
    Ok(Json(colors))
}

/// Storage accepts any encodable id, so palette membership is checked here.
pub async fn add_color(
    State(state): State<AppState>,
    Path((card_id, color_id)): Path<(String, u8)>,
) -> Result<impl IntoResponse, ApiError> {
    validate::color_id(state.db.palette(), color_id)?;
    blocking(&state, move |db| db.add_color(&card_id, color_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_color(
    State(state): State<AppState>,
    Path((card_id, color_id)): Path<(String, u8)>,
) -> Result<impl IntoResponse, ApiError> {
    blocking(&state, move |db| db.remove_color(&card_id, color_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
