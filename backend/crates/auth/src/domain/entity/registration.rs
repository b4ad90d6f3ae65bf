//! Registration Entity
//!
//! A validated sign-up form, ready to hand to the back-end.

use crate::domain::value_object::{email::Email, password::NewPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct Registration {
    pub email: Email,
    pub password: NewPassword,
    pub first_name: String,
    pub last_name: String,
}

impl Registration {
    /// Validate the raw form fields.
    ///
    /// Checks run in a fixed order so the user always sees the first problem:
    /// presence, e-mail format, password length, confirmation match.
    pub fn new(
        email: &str,
        password: &str,
        confirm_password: &str,
        first_name: &str,
        last_name: &str,
    ) -> AuthResult<Self> {
        let all_present = [email, password, confirm_password, first_name, last_name]
            .iter()
            .all(|field| !field.trim().is_empty());
        if !all_present {
            return Err(AuthError::Validation("All fields are required".into()));
        }

        let email = Email::new(email)?;
        let password = NewPassword::new(password, confirm_password)?;

        Ok(Self {
            email,
            password,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AuthError) -> String {
        err.to_string()
    }

    #[test]
    fn test_missing_field() {
        let err = Registration::new("a@b.co", "password1", "password1", " ", "Doe").unwrap_err();
        assert_eq!(message(err), "All fields are required");
    }

    #[test]
    fn test_format_checked_before_length() {
        let err = Registration::new("not-an-email", "short", "short", "Jo", "Doe").unwrap_err();
        assert_eq!(message(err), "Invalid email format");
    }

    #[test]
    fn test_length_checked_before_match() {
        let err = Registration::new("a@b.co", "1234567", "7654321", "Jo", "Doe").unwrap_err();
        assert_eq!(message(err), "Password must be at least 8 characters");
    }

    #[test]
    fn test_valid_registration_trims_names() {
        let reg = Registration::new(" Jo@B.co ", "password1", "password1", " Jo ", "Doe ").unwrap();
        assert_eq!(reg.email.as_str(), "jo@b.co");
        assert_eq!(reg.first_name, "Jo");
        assert_eq!(reg.last_name, "Doe");
    }
}
