//! Email Value Object
//!
//! Shape check only (`local@domain.tld`, no whitespace). Whether the address
//! exists is proven by the confirmation e-mail the hosted service sends.

use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

const INVALID_FORMAT: &str = "Invalid email format";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> AuthResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.len() > EMAIL_MAX_LENGTH || !Self::is_valid_format(&email) {
            return Err(AuthError::Validation(INVALID_FORMAT.into()));
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || domain.contains('@') {
            return false;
        }

        // At least one dot with something on both sides
        match domain.rsplit_once('.') {
            Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
