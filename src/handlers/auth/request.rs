//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::MAX_NAME_LENGTH,
    utils::validation::{not_blank, password_strength},
};

/// Account registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH), custom(function = "not_blank"))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "password_strength"))]
    pub password: String,

    /// `attendee` (default) or `organizer`
    pub role: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Password reset initiation
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Password reset completion
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,

    #[validate(custom(function = "password_strength"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: None,
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register("Ada", "ada@example.com", "Secur3Pass").validate().is_ok());

        let errors = register("   ", "ada@example.com", "Secur3Pass")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let errors = register("Ada", "not-an-email", "Secur3Pass")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let errors = register("Ada", "ada@example.com", "short")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_reset_password_request_validation() {
        let ok = ResetPasswordRequest {
            token: "abc123".to_string(),
            password: "N3wPassword".to_string(),
        };
        assert!(ok.validate().is_ok());

        let missing_token = ResetPasswordRequest {
            token: String::new(),
            password: "N3wPassword".to_string(),
        };
        assert!(missing_token.validate().is_err());
    }
}
