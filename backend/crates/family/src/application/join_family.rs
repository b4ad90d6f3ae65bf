//! Join Family Use Case
//!
//! Redeems an invitation code for the signed-in user.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::repository::{Caller, FamilyStore};
use crate::domain::value_object::{
    family_id::FamilyId, invitation_code::InvitationCode, member_role::MemberRole,
};
use crate::error::{FamilyError, FamilyResult};

pub struct JoinFamilyUseCase<S>
where
    S: FamilyStore,
{
    store: Arc<S>,
}

impl<S> JoinFamilyUseCase<S>
where
    S: FamilyStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, caller: Caller<'_>, code: &InvitationCode) -> FamilyResult<FamilyId> {
        let invitation = self
            .store
            .find_invitation(caller, code)
            .await?
            .ok_or(FamilyError::InvitationNotFound)?;

        if invitation.is_expired(Utc::now()) {
            return Err(FamilyError::InvitationExpired);
        }

        match self
            .store
            .add_member(caller, &invitation.family_id, MemberRole::Member)
            .await
        {
            Ok(()) => {
                tracing::info!(family_id = %invitation.family_id, user_id = caller.user_id, "Joined family");
            }
            // Following the same link twice is fine
            Err(FamilyError::AlreadyMember) => {
                tracing::debug!(family_id = %invitation.family_id, "Already a member");
            }
            Err(e) => return Err(e),
        }

        Ok(invitation.family_id)
    }
}
