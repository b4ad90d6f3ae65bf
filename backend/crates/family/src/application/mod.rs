//! Application Layer
//!
//! Use cases, configuration and the onboarding sequencer.

pub mod add_children;
pub mod config;
pub mod create_family;
pub mod dashboard;
pub mod family_setup;
pub mod invite_parent;
pub mod join_family;
pub mod onboarding_check;
pub mod step;

// Re-exports
pub use add_children::{AddChildrenUseCase, ChildInput};
pub use config::OnboardingConfig;
pub use create_family::CreateFamilyUseCase;
pub use dashboard::{DashboardOutput, DashboardUseCase};
pub use family_setup::FamilySetupUseCase;
pub use invite_parent::{InvitationOutput, InviteParentUseCase};
pub use join_family::JoinFamilyUseCase;
pub use onboarding_check::OnboardingCheckUseCase;
pub use step::{Navigation, OnboardingStep, StepAccess};
