//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entities, value objects, the back-end trait
//! - `application/` - Use cases, configuration and the session gate decision
//! - `infra/` - Hosted auth service (Supabase GoTrue) implementation
//! - `presentation/` - HTTP handlers, DTOs, gate middleware, router
//!
//! ## Features
//! - E-mail + password sign-up, login and sign-out
//! - Password recovery and e-mail confirmation through PKCE links
//! - Session gate in front of every route, with token refresh and a
//!   redirect-loop guard
//!
//! Credentials never touch this service's storage: the hosted service owns
//! accounts and tokens, the browser keeps the token pair in cookies.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

// Re-exports for convenience
pub use application::config::{AuthConfig, GateConfig};
pub use application::current_session::ResolvedSession;
pub use domain::entity::session::AuthUser;
pub use domain::value_object::user_id::UserId;
pub use domain::repository::AuthBackend;
pub use error::{AuthError, AuthResult};
pub use infra::supabase::SupabaseAuth;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::CurrentSession;
pub use presentation::router::{auth_router, with_session_gate};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::session::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
