//! HTTP handlers for heroes, powers and hero_powers.

pub mod hero_powers;
pub mod heroes;
pub mod powers;
pub use hero_powers::*;
pub use heroes::*;
pub use powers::*;

use crate::error::AppError;
use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

/// Ids that are not integers can never match a row, so they are reported as not found.
pub(crate) fn parse_id(id_str: &str, not_found: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_integer_ids_are_not_found() {
        assert_eq!(parse_id("42", "Hero not found").unwrap(), 42);
        let err = parse_id("abc", "Hero not found").unwrap_err();
        assert!(matches!(err, AppError::NotFound(m) if m == "Hero not found"));
    }
}
