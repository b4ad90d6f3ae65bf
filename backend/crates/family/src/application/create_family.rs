//! Create Family Use Case
//!
//! First onboarding step: the family record plus the caller's admin
//! membership.

use std::sync::Arc;

use crate::domain::entity::family::Family;
use crate::domain::repository::{Caller, FamilyStore};
use crate::domain::value_object::{family_name::FamilyName, member_role::MemberRole};
use crate::error::FamilyResult;

pub struct CreateFamilyUseCase<S>
where
    S: FamilyStore,
{
    store: Arc<S>,
}

impl<S> CreateFamilyUseCase<S>
where
    S: FamilyStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, caller: Caller<'_>, family_name: &str) -> FamilyResult<Family> {
        let name = FamilyName::new(family_name)?;

        let family = self.store.create_family(caller, &name).await?;

        // Not compensated: a failure here leaves a family without its admin
        if let Err(e) = self
            .store
            .add_member(caller, &family.id, MemberRole::Admin)
            .await
        {
            tracing::error!(family_id = %family.id, user_id = caller.user_id, "Admin membership insert failed");
            return Err(e);
        }

        tracing::info!(family_id = %family.id, user_id = caller.user_id, "Family created");

        Ok(family)
    }
}
