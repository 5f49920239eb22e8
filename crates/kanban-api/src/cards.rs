use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use kanban_types::api::{CreateCardRequest, MoveCardsRequest, UpdateCardRequest};

use crate::error::ApiError;
use crate::state::{AppState, blocking};

pub async fn create_card(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Json(req): Json<CreateCardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let card = blocking(&state, move |db| db.create_card(&list_id, &req)).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn list_cards(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let order = blocking(&state, move |db| db.list_cards(&list_id)).await?;
    Ok(Json(order))
}

pub async fn get_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let card = blocking(&state, move |db| db.find_card(&card_id)).await?;
    Ok(Json(card))
}

pub async fn update_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    Json(req): Json<UpdateCardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = blocking(&state, move |db| db.update_card(&card_id, &req)).await?;
    Ok(Json(patch))
}

pub async fn drop_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dropped = blocking(&state, move |db| db.drop_card(&card_id)).await?;
    Ok(Json(dropped))
}

pub async fn move_cards(
    State(state): State<AppState>,
    Json(req): Json<MoveCardsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let lists =
        blocking(&state, move |db| db.move_cards(req.source_list, req.target_list)).await?;
    Ok(Json(lists))
}
