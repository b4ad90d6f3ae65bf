//! Dashboard Use Case

use std::sync::Arc;

use auth::{AuthUser, ResolvedSession};
use serde::Serialize;

use crate::domain::entity::{child::Child, membership::Membership, profile::Profile};
use crate::domain::repository::{Caller, FamilyStore};
use crate::error::FamilyResult;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOutput {
    pub user: AuthUser,
    /// `None` when the profile row was never created
    pub profile: Option<Profile>,
    pub families: Vec<Membership>,
    /// Children of the first family
    pub children: Vec<Child>,
}

pub struct DashboardUseCase<S>
where
    S: FamilyStore,
{
    store: Arc<S>,
}

impl<S> DashboardUseCase<S>
where
    S: FamilyStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, session: &ResolvedSession) -> FamilyResult<DashboardOutput> {
        let caller = Caller::from(session);

        let profile = self.store.find_profile(caller).await?;
        let families = self.store.memberships(caller).await?;

        let children = match families.first() {
            Some(first) => self.store.children(caller, &first.family.id).await?,
            None => Vec::new(),
        };

        Ok(DashboardOutput {
            user: session.user.clone(),
            profile,
            families,
            children,
        })
    }
}
