//! Field-level validation for powers and hero_powers.

use crate::models::{NewHeroPower, PowerPatch, Strength};
use std::fmt;

/// Minimum number of characters in a power description.
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Messages for every field that failed validation in one request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }

    /// Ok when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A hero_power create request whose fields passed static validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidHeroPower {
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Description length is counted in characters.
    pub fn validate_description(description: &str, errors: &mut ValidationErrors) {
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            errors.push(format!(
                "description must be at least {} characters",
                MIN_DESCRIPTION_LEN
            ));
        }
    }

    /// Strength must name one of the enumerated ratings exactly.
    pub fn validate_strength(strength: &str, errors: &mut ValidationErrors) -> Option<Strength> {
        match strength.parse::<Strength>() {
            Ok(s) => Some(s),
            Err(_) => {
                errors.push(format!(
                    "strength must be one of: {}",
                    Strength::ALL
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                None
            }
        }
    }

    /// Validate only the fields present in the patch. At least one field is required.
    pub fn validate_power_patch(patch: &PowerPatch) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if patch.name.is_none() && patch.description.is_none() {
            errors.push("at least one of name, description is required");
        }
        if let Some(description) = &patch.description {
            Self::validate_description(description, &mut errors);
        }
        errors.into_result()
    }

    /// All fields are required; strength must be a known rating.
    pub fn validate_hero_power(body: &NewHeroPower) -> Result<ValidHeroPower, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let strength = match body.strength.as_deref() {
            Some(s) => Self::validate_strength(s, &mut errors),
            None => {
                errors.push("strength is required");
                None
            }
        };
        if body.hero_id.is_none() {
            errors.push("hero_id is required");
        }
        if body.power_id.is_none() {
            errors.push("power_id is required");
        }
        match (strength, body.hero_id, body.power_id) {
            (Some(strength), Some(hero_id), Some(power_id)) if errors.is_empty() => {
                Ok(ValidHeroPower {
                    strength,
                    hero_id,
                    power_id,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_power(strength: Option<&str>, hero_id: Option<i64>, power_id: Option<i64>) -> NewHeroPower {
        NewHeroPower {
            strength: strength.map(String::from),
            hero_id,
            power_id,
        }
    }

    #[test]
    fn description_of_19_chars_is_rejected() {
        let mut errors = ValidationErrors::default();
        RequestValidator::validate_description(&"a".repeat(19), &mut errors);
        assert_eq!(errors.messages(), ["description must be at least 20 characters"]);
    }

    #[test]
    fn description_of_20_chars_is_accepted() {
        let mut errors = ValidationErrors::default();
        RequestValidator::validate_description(&"a".repeat(20), &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn description_length_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::default();
        // 10 chars, 20 bytes
        RequestValidator::validate_description(&"é".repeat(10), &mut errors);
        assert!(!errors.is_empty());
    }

    #[test]
    fn empty_patch_is_rejected() {
        let patch = PowerPatch::default();
        assert!(RequestValidator::validate_power_patch(&patch).is_err());
    }

    #[test]
    fn name_only_patch_skips_description_rule() {
        let patch = PowerPatch {
            name: Some("flight".into()),
            description: None,
        };
        assert!(RequestValidator::validate_power_patch(&patch).is_ok());
    }

    #[test]
    fn mighty_is_not_a_strength() {
        let err = RequestValidator::validate_hero_power(&hero_power(Some("Mighty"), Some(1), Some(2)))
            .unwrap_err();
        assert_eq!(err.messages(), ["strength must be one of: Strong, Weak, Average"]);
    }

    #[test]
    fn strength_is_case_sensitive() {
        assert!(RequestValidator::validate_hero_power(&hero_power(Some("strong"), Some(1), Some(2))).is_err());
    }

    #[test]
    fn every_missing_field_is_reported() {
        let err = RequestValidator::validate_hero_power(&hero_power(None, None, None)).unwrap_err();
        assert_eq!(
            err.messages(),
            ["strength is required", "hero_id is required", "power_id is required"]
        );
    }

    #[test]
    fn valid_hero_power_passes() {
        let valid = RequestValidator::validate_hero_power(&hero_power(Some("Average"), Some(3), Some(4))).unwrap();
        assert_eq!(
            valid,
            ValidHeroPower {
                strength: Strength::Average,
                hero_id: 3,
                power_id: 4,
            }
        );
    }
}
