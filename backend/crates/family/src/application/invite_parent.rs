//! Invite Parent Use Case

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::config::OnboardingConfig;
use crate::domain::entity::invitation::Invitation;
use crate::domain::repository::{Caller, FamilyStore};
use crate::domain::value_object::family_id::FamilyId;
use crate::error::FamilyResult;

#[derive(Debug, Clone, Serialize)]
pub struct InvitationOutput {
    pub code: String,
    pub invite_url: String,
    pub expires_at: DateTime<Utc>,
}

pub struct InviteParentUseCase<S>
where
    S: FamilyStore,
{
    store: Arc<S>,
    config: Arc<OnboardingConfig>,
}

impl<S> InviteParentUseCase<S>
where
    S: FamilyStore,
{
    pub fn new(store: Arc<S>, config: Arc<OnboardingConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, caller: Caller<'_>, family_id: &FamilyId) -> FamilyResult<InvitationOutput> {
        let invitation = Invitation::issue(family_id.clone(), caller.user_id, Utc::now());

        self.store.create_invitation(caller, &invitation).await?;

        tracing::info!(family_id = %family_id, expires_at = %invitation.expires_at, "Invitation created");

        Ok(InvitationOutput {
            invite_url: self.config.invite_url(invitation.code.as_str()),
            code: invitation.code.to_string(),
            expires_at: invitation.expires_at,
        })
    }
}
