//! Superheroes API: heroes, powers and the hero_powers association over REST, backed by PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod observability;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;

pub use config::Settings;
pub use db::{connect, ensure_database_exists};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use models::{Hero, HeroDetail, HeroPower, HeroPowerDetail, Power, Strength};
pub use observability::init_tracing;
pub use routes::{api_routes, app, common_routes};
pub use seed::seed_if_empty;
pub use service::{HeroService, RequestValidator, ValidationErrors};
pub use state::AppState;
