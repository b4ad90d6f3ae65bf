//! Auth DTOs
//!
//! Form bodies accepted by the POST routes and the JSON page views returned by
//! the GET routes.

use serde::{Deserialize, Serialize};

// ============================================================================
// Query strings
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct AuthPageQuery {
    pub message: Option<String>,
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub next: Option<String>,
}

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

// ============================================================================
// Views
// ============================================================================

/// Page view for the login, sign-up and forgot-password forms
#[derive(Debug, Serialize)]
pub struct AuthPageView {
    pub page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordView {
    pub page: &'static str,
    /// False when the recovery link was not followed (or has expired)
    pub has_session: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
