//! Hero, power and hero_power routes.

use crate::handlers::{create_hero_power, index, list_heroes, list_powers, read_hero, read_power, update_power};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/heroes", get(list_heroes))
        .route("/heroes/:id", get(read_hero))
        .route("/powers", get(list_powers))
        .route("/powers/:id", get(read_power).patch(update_power))
        .route("/hero_powers", post(create_hero_power))
        .with_state(state)
}
