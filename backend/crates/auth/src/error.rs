//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. The `Display` text of every client-side
//! variant is the message shown inline on the form.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::supabase::SupabaseError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Local form validation failed; the message is user-facing
    #[error("{0}")]
    Validation(String),

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("This email is already in use")]
    EmailTaken,

    /// The action needs a signed-in user
    #[error("Your session has expired. Please sign in again.")]
    SessionRequired,

    /// The confirmation or recovery link could not be exchanged
    #[error("This link is invalid or has expired")]
    CodeExchange,

    /// The hosted backend failed or refused the request
    #[error("Backend error: {0}")]
    Backend(#[from] SupabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::CodeExchange => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::SessionRequired => ErrorKind::Unauthorized,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Backend(e) if e.is_unreachable() => ErrorKind::ServiceUnavailable,
            AuthError::Backend(_) => ErrorKind::BadGateway,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Backend and internal details stay in the log; the user only sees a
    /// generic retry hint for those.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Backend(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Something went wrong on our side")
                    .with_action("Please try again in a moment")
            }
            AuthError::SessionRequired => {
                AppError::new(self.kind(), self.to_string()).with_action("Sign in")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Backend(e) => {
                tracing::error!(error = %e, status = ?e.status(), code = ?e.code(), "Auth backend error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::CodeExchange => {
                tracing::warn!("Auth code exchange failed");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
