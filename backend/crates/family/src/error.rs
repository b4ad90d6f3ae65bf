//! Family Error Types
//!
//! Family-specific error variants mapped onto `kernel::error::AppError`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::supabase::SupabaseError;
use thiserror::Error;

pub type FamilyResult<T> = Result<T, FamilyError>;

#[derive(Debug, Error)]
pub enum FamilyError {
    /// Local form validation failed; the message is user-facing
    #[error("{0}")]
    Validation(String),

    #[error("This invitation code does not exist")]
    InvitationNotFound,

    #[error("This invitation has expired")]
    InvitationExpired,

    /// The user already belongs to the family
    #[error("You are already a member of this family")]
    AlreadyMember,

    #[error("Store error: {0}")]
    Store(#[from] SupabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FamilyError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FamilyError::Validation(_) => ErrorKind::BadRequest,
            FamilyError::InvitationNotFound => ErrorKind::NotFound,
            FamilyError::InvitationExpired => ErrorKind::Gone,
            FamilyError::AlreadyMember => ErrorKind::Conflict,
            FamilyError::Store(e) if e.is_unreachable() => ErrorKind::ServiceUnavailable,
            FamilyError::Store(e) if e.is_unauthorized() => ErrorKind::Forbidden,
            FamilyError::Store(_) => ErrorKind::BadGateway,
            FamilyError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            FamilyError::Store(_) | FamilyError::Internal(_) => {
                AppError::new(self.kind(), "We could not save your changes")
                    .with_action("Please try again")
            }
            FamilyError::InvitationExpired => AppError::new(self.kind(), self.to_string())
                .with_action("Ask the family admin for a new invitation"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            FamilyError::Store(e) => {
                tracing::error!(error = %e, status = ?e.status(), code = ?e.code(), "Family store error");
            }
            FamilyError::Internal(msg) => {
                tracing::error!(message = %msg, "Family internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Family error");
            }
        }
    }
}

impl IntoResponse for FamilyError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
