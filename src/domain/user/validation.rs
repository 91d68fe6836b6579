//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username must be a valid email address")]
    UsernameNotEmail,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MAX_USERNAME_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate a login name
///
/// Rules:
/// - Cannot be empty
/// - Maximum 254 characters
/// - Email shaped: a single '@', non-empty local part, dotted domain, no whitespace
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    if username.chars().any(char::is_whitespace) {
        return Err(UserValidationError::UsernameNotEmail);
    }

    let Some((local, domain)) = username.split_once('@') else {
        return Err(UserValidationError::UsernameNotEmail);
    };

    if local.is_empty() || domain.contains('@') {
        return Err(UserValidationError::UsernameNotEmail);
    }

    let labels: Vec<&str> = domain.split('.').collect();

    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(UserValidationError::UsernameNotEmail);
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 8 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("user@example.com").is_ok());
        assert!(validate_username("first.last+tag@club.co.uk").is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(validate_username(""), Err(UserValidationError::EmptyUsername));
    }

    #[test]
    fn test_username_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            validate_username(&long),
            Err(UserValidationError::UsernameTooLong(254))
        );
    }

    #[test]
    fn test_username_not_email() {
        for candidate in [
            "plainname",
            "@example.com",
            "user@",
            "user@localhost",
            "user@example..com",
            "user@@example.com",
            "us er@example.com",
        ] {
            assert_eq!(
                validate_username(candidate),
                Err(UserValidationError::UsernameNotEmail),
                "{candidate} should be rejected"
            );
        }
    }

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("password").is_ok());
        assert!(validate_password("P@ssw0rd!").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("1234567"),
            Err(UserValidationError::PasswordTooShort(8))
        );
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(129);
        assert_eq!(
            validate_password(&long_password),
            Err(UserValidationError::PasswordTooLong(128))
        );
    }
}
