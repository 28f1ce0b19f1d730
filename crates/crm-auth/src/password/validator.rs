//! Password policy for new passwords.

use crm_core::config::AuthConfig;
use crm_core::error::AppError;

/// Upper bound that keeps hashing cost predictable.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Minimum accepted length in characters.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Returns `Ok(())` if the password meets the policy, or an error
    /// describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();

        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if length > MAX_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
            )));
        }

        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("guest123").is_ok());
        assert!(validator.validate("abc12").is_err());
        assert!(validator.validate("abc123").is_ok());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("çãõ").is_err());
    }

    #[test]
    fn test_blank_and_oversized() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("        ").is_err());
        assert!(validator.validate(&"x".repeat(129)).is_err());
    }
}
