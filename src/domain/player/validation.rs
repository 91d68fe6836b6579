//! Player validation utilities

use thiserror::Error;

use super::entity::PlayerPatch;
use crate::domain::team::validate_country;

/// Errors that can occur during player validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlayerValidationError {
    #[error("Player name cannot be empty")]
    EmptyName,

    #[error("Player surname cannot be empty")]
    EmptySurname,

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Invalid player country: {0}")]
    Country(String),
}

const MAX_NAME_LENGTH: usize = 60;

fn check_length(field: &'static str, value: &str) -> Result<(), PlayerValidationError> {
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(PlayerValidationError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validate every supplied field of a player patch
pub fn validate_player_patch(patch: &PlayerPatch) -> Result<(), PlayerValidationError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(PlayerValidationError::EmptyName);
        }
        check_length("Player name", name)?;
    }

    if let Some(surname) = &patch.surname {
        if surname.trim().is_empty() {
            return Err(PlayerValidationError::EmptySurname);
        }
        check_length("Player surname", surname)?;
    }

    if let Some(country) = &patch.country {
        validate_country(country).map_err(|e| PlayerValidationError::Country(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(validate_player_patch(&PlayerPatch::default()).is_ok());
    }

    #[test]
    fn test_blank_surname() {
        let patch = PlayerPatch {
            surname: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_player_patch(&patch),
            Err(PlayerValidationError::EmptySurname)
        );
    }

    #[test]
    fn test_name_too_long() {
        let patch = PlayerPatch {
            name: Some("x".repeat(61)),
            ..Default::default()
        };
        assert!(matches!(
            validate_player_patch(&patch),
            Err(PlayerValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_blank_country() {
        let patch = PlayerPatch {
            country: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            validate_player_patch(&patch),
            Err(PlayerValidationError::Country(_))
        ));
    }
}
