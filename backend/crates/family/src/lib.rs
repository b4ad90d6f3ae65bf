//! Family Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Families, members, children, invitations; the store trait
//! - `application/` - Onboarding sequencer and use cases
//! - `infra/` - PostgREST store implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Onboarding wizard: create family, add children, invite the co-parent
//! - Joining a family through an invitation code
//! - Post-login routing and the dashboard summary
//!
//! Handlers read the session resolved by the auth crate's session gate, so the
//! router must be mounted behind `auth::with_session_gate`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::OnboardingConfig;
pub use error::{FamilyError, FamilyResult};
pub use infra::supabase::SupabaseFamilyStore;
pub use presentation::handlers::FamilyAppState;
pub use presentation::router::family_router;

#[cfg(test)]
mod testing;
