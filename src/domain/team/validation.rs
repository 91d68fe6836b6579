//! Team validation utilities

use thiserror::Error;

use super::entity::TeamPatch;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Country cannot be empty")]
    EmptyCountry,

    #[error("Country exceeds maximum length of {0} characters")]
    CountryTooLong(usize),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;
const MAX_COUNTRY_LENGTH: usize = 100;

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a country name (shared by teams and players)
pub fn validate_country(country: &str) -> Result<(), TeamValidationError> {
    if country.trim().is_empty() {
        return Err(TeamValidationError::EmptyCountry);
    }

    if country.chars().count() > MAX_COUNTRY_LENGTH {
        return Err(TeamValidationError::CountryTooLong(MAX_COUNTRY_LENGTH));
    }

    Ok(())
}

/// Validate every supplied field of a patch
pub fn validate_team_patch(patch: &TeamPatch) -> Result<(), TeamValidationError> {
    if let Some(name) = &patch.name {
        validate_team_name(name)?;
    }

    if let Some(country) = &patch.country {
        validate_country(country)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_team_names() {
        assert!(validate_team_name("Team of user@example.com").is_ok());
        assert!(validate_team_name("A").is_ok());
    }

    #[test]
    fn test_empty_team_name() {
        assert_eq!(validate_team_name(""), Err(TeamValidationError::EmptyName));
        assert_eq!(validate_team_name("   "), Err(TeamValidationError::EmptyName));
    }

    #[test]
    fn test_team_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_team_name(&long_name),
            Err(TeamValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_country() {
        assert!(validate_country("Brazil").is_ok());
        assert_eq!(validate_country(""), Err(TeamValidationError::EmptyCountry));
    }

    #[test]
    fn test_patch_validation_skips_absent_fields() {
        assert!(validate_team_patch(&TeamPatch::default()).is_ok());

        let patch = TeamPatch {
            name: None,
            country: Some(" ".to_string()),
        };
        assert_eq!(
            validate_team_patch(&patch),
            Err(TeamValidationError::EmptyCountry)
        );
    }
}
