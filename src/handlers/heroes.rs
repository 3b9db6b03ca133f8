//! Hero handlers: list and read-with-powers.

use crate::error::AppError;
use crate::handlers::parse_id;
use crate::service::{HeroService, HERO_NOT_FOUND};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

pub async fn list_heroes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let heroes = HeroService::list_heroes(&state.pool).await?;
    Ok(Json(heroes))
}

pub async fn read_hero(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, HERO_NOT_FOUND)?;
    let hero = HeroService::read_hero_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(HERO_NOT_FOUND.into()))?;
    Ok(Json(hero))
}
