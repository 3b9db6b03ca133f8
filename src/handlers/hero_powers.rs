//! Hero_power handler: create an association between a hero and a power.

use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::models::NewHeroPower;
use crate::service::{HeroService, RequestValidator};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// Fields are checked before the database is touched; references are checked in the insert transaction.
pub async fn create_hero_power(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewHeroPower>,
) -> Result<impl IntoResponse, AppError> {
    let valid = RequestValidator::validate_hero_power(&body)?;
    let hero_power = HeroService::create_hero_power(&state.pool, valid).await?;
    Ok((StatusCode::OK, Json(hero_power)))
}
