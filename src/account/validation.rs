//! Input validation for registration and login
//!
//! Checks run in a fixed order so the first failing rule decides the message.

use validator::ValidateEmail;

use crate::error::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration input after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    /// Lowercased
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

/// Login input after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLogin {
    /// Lowercased
    pub email: String,
    pub password: String,
}

/// Address with a local part, an `@`, and a dotted domain
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let dotted = domain
        .split_once('.')
        .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty());
    dotted && email.validate_email()
}

/// Trim, then empty becomes `None`
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate_registration(
    email: &str,
    name: Option<&str>,
    password: &str,
    confirm_password: &str,
) -> Result<ValidRegistration, AppError> {
    if email.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(AppError::validation(
            "Email, password, and confirm password are required",
        ));
    }

    if password != confirm_password {
        return Err(AppError::validation("Passwords do not match"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }

    if !is_valid_email(email) {
        return Err(AppError::validation("Please enter a valid email address"));
    }

    Ok(ValidRegistration {
        email: email.to_lowercase(),
        name: normalize_optional(name),
        password: password.to_string(),
    })
}

pub fn validate_login(email: &str, password: &str) -> Result<ValidLogin, AppError> {
    if email.is_empty() || password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }
    Ok(ValidLogin {
        email: email.to_lowercase(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        assert!(matches!(err, AppError::Validation(_)));
        err.to_string()
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("u@test.com"));
        assert!(is_valid_email("First.Last+tag@sub.example.org"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("u@localhost"));
        assert!(!is_valid_email("u@.com"));
        assert!(!is_valid_email("u @test.com"));
        assert!(!is_valid_email("@test.com"));
    }

    #[test]
    fn test_registration_ok_lowercases_email() {
        let valid = validate_registration("A@X.com", Some("  Ada  "), "secret1", "secret1").unwrap();
        assert_eq!(valid.email, "a@x.com");
        assert_eq!(valid.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_registration_blank_name_is_absent() {
        let valid = validate_registration("a@x.com", Some("   "), "secret1", "secret1").unwrap();
        assert_eq!(valid.name, None);
    }

    #[test]
    fn test_registration_missing_fields() {
        let err = validate_registration("", None, "secret1", "secret1").unwrap_err();
        assert_eq!(
            message(err),
            "Email, password, and confirm password are required"
        );
        let err = validate_registration("a@x.com", None, "secret1", "").unwrap_err();
        assert_eq!(
            message(err),
            "Email, password, and confirm password are required"
        );
    }

    #[test]
    fn test_registration_mismatch_checked_before_length() {
        let err = validate_registration("a@x.com", None, "abc", "abd").unwrap_err();
        assert_eq!(message(err), "Passwords do not match");
    }

    #[test]
    fn test_registration_short_password() {
        let err = validate_registration("a@x.com", None, "abcde", "abcde").unwrap_err();
        assert_eq!(message(err), "Password must be at least 6 characters long");
        assert!(validate_registration("a@x.com", None, "abcdef", "abcdef").is_ok());
    }

    #[test]
    fn test_registration_bad_email() {
        let err = validate_registration("not-an-email", None, "secret1", "secret1").unwrap_err();
        assert_eq!(message(err), "Please enter a valid email address");
    }

    #[test]
    fn test_login_requires_both_fields() {
        let err = validate_login("", "secret1").unwrap_err();
        assert_eq!(message(err), "Email and password are required");
        let err = validate_login("a@x.com", "").unwrap_err();
        assert_eq!(message(err), "Email and password are required");
        assert_eq!(validate_login("A@X.COM", "pw").unwrap().email, "a@x.com");
    }
}
