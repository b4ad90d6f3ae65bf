//! Password Value Object
//!
//! A new password chosen on sign-up or reset. Hashing and verification are
//! done by the hosted auth service; this type only enforces the local rules.

use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Minimum password length in characters
pub const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Clone)]
pub struct NewPassword(String);

impl NewPassword {
    /// Validate `password` against its confirmation.
    ///
    /// Length is checked first; a short password is rejected even when the
    /// confirmation also matches.
    pub fn new(password: &str, confirm: &str) -> AuthResult<Self> {
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {PASSWORD_MIN_LENGTH} characters"
            )));
        }

        if password != confirm {
            return Err(AuthError::Validation("Passwords do not match".into()));
        }

        Ok(Self(password.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(***)")
    }
}
