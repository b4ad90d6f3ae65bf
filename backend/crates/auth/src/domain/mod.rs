//! Domain Layer
//!
//! Contains entities, value objects, and the back-end trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::session::{AuthUser, Session, SignUpOutcome};
pub use repository::{AuthBackend, LocalAuthBackend};
