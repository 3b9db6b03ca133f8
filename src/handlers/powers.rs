//! Power handlers: list, read and partial update.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::handlers::parse_id;
use crate::models::PowerPatch;
use crate::service::{HeroService, POWER_NOT_FOUND};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

pub async fn list_powers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let powers = HeroService::list_powers(&state.pool).await?;
    Ok(Json(powers))
}

pub async fn read_power(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, POWER_NOT_FOUND)?;
    let power = HeroService::read_power(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(POWER_NOT_FOUND.into()))?;
    Ok(Json(power))
}

/// A missing power is reported before anything wrong with the body.
pub async fn update_power(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<ApiJson<PowerPatch>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, POWER_NOT_FOUND)?;
    let patch = match body {
        Ok(ApiJson(patch)) => patch,
        Err(rejection) => {
            if HeroService::read_power(&state.pool, id).await?.is_none() {
                return Err(AppError::NotFound(POWER_NOT_FOUND.into()));
            }
            return Err(rejection);
        }
    };
    let power = HeroService::update_power(&state.pool, id, &patch).await?;
    Ok(Json(power))
}
