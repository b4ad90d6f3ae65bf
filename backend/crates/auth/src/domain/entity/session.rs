//! Session Entity
//!
//! A signed-in user as reported by the hosted auth service, together with the
//! token pair that proves it. The token pair lives in the browser's cookies;
//! nothing here is persisted by this service.

use serde::Serialize;

use crate::domain::value_object::user_id::UserId;

/// The authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<String>,
    /// From sign-up metadata; empty when the account predates it
    pub first_name: String,
    pub last_name: String,
}

/// Token pair plus the user it belongs to
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    /// Absolute expiry (unix seconds), when the backend reports it
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

/// Result of a successful registration
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// Auto-confirmed: the user is signed in right away
    SignedIn(Session),
    /// The user must follow the confirmation e-mail first
    ConfirmationRequired(AuthUser),
}

impl SignUpOutcome {
    pub fn user(&self) -> &AuthUser {
        match self {
            SignUpOutcome::SignedIn(session) => &session.user,
            SignUpOutcome::ConfirmationRequired(user) => user,
        }
    }
}
