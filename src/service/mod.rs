//! HeroService: persistence for heroes, powers and hero_powers, plus request validation.

mod crud;
mod validation;
pub use crud::{HeroService, HERO_NOT_FOUND, POWER_NOT_FOUND};
pub use validation::{RequestValidator, ValidHeroPower, ValidationErrors, MIN_DESCRIPTION_LEN};
