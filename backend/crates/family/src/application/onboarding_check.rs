//! Onboarding Check Use Case
//!
//! Post-login routing: members go to the dashboard, everyone else starts the
//! wizard.

use std::sync::Arc;

use crate::application::config::OnboardingConfig;
use crate::application::step::OnboardingStep;
use crate::domain::repository::{Caller, FamilyStore};

pub struct OnboardingCheckUseCase<S>
where
    S: FamilyStore,
{
    store: Arc<S>,
    config: Arc<OnboardingConfig>,
}

impl<S> OnboardingCheckUseCase<S>
where
    S: FamilyStore,
{
    pub fn new(store: Arc<S>, config: Arc<OnboardingConfig>) -> Self {
        Self { store, config }
    }

    /// Destination path. A failed lookup is treated as "no family yet".
    pub async fn execute(&self, caller: Caller<'_>) -> String {
        match self.store.memberships(caller).await {
            Ok(memberships) if !memberships.is_empty() => self.config.dashboard_path.clone(),
            Ok(_) => OnboardingStep::CreateFamily.path().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, user_id = caller.user_id, "Membership lookup failed");
                OnboardingStep::CreateFamily.path().to_string()
            }
        }
    }
}
