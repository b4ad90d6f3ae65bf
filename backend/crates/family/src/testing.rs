//! In-memory family store for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::entity::{
    child::{Child, NewChild},
    family::Family,
    invitation::Invitation,
    membership::Membership,
    profile::Profile,
};
use crate::domain::repository::{Caller, FamilyStore};
use crate::domain::value_object::{
    family_id::FamilyId, family_name::FamilyName, invitation_code::InvitationCode,
    member_role::MemberRole,
};
use crate::error::{FamilyError, FamilyResult};

#[derive(Debug, Clone)]
pub struct MemberRecord {
    pub family_id: FamilyId,
    pub user_id: String,
    pub role: MemberRole,
}

#[derive(Debug, Default)]
struct StoreState {
    families: Vec<Family>,
    members: Vec<MemberRecord>,
    children: Vec<Child>,
    invitations: Vec<Invitation>,
    profiles: Vec<Profile>,
    next_id: usize,
}

#[derive(Clone, Default)]
pub struct FakeFamilyStore {
    state: Arc<Mutex<StoreState>>,
    writes: Arc<AtomicUsize>,
}

impl FakeFamilyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next_id(state: &mut StoreState, prefix: &str) -> String {
        state.next_id += 1;
        format!("{prefix}-{}", state.next_id)
    }

    /// Seed a family with `user_id` as a member
    pub fn seed_family(&self, name: &str, user_id: &str, role: MemberRole) -> FamilyId {
        let mut state = self.lock();
        let id = FamilyId::from_db(Self::next_id(&mut state, "family"));
        state.families.push(Family {
            id: id.clone(),
            name: name.to_string(),
        });
        state.members.push(MemberRecord {
            family_id: id.clone(),
            user_id: user_id.to_string(),
            role,
        });
        id
    }

    pub fn seed_invitation(&self, code: &str, family_id: &FamilyId, expires_at: DateTime<Utc>) {
        self.lock().invitations.push(Invitation {
            code: InvitationCode::parse(Some(code)).unwrap_or_else(InvitationCode::generate),
            family_id: family_id.clone(),
            created_by: "someone".to_string(),
            expires_at,
        });
    }

    pub fn seed_profile(&self, profile: Profile) {
        self.lock().profiles.push(profile);
    }

    /// Number of insert calls made so far
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn families(&self) -> Vec<Family> {
        self.lock().families.clone()
    }

    pub fn members(&self) -> Vec<MemberRecord> {
        self.lock().members.clone()
    }

    pub fn children_of(&self, family_id: &FamilyId) -> Vec<Child> {
        self.lock()
            .children
            .iter()
            .filter(|c| &c.family_id == family_id)
            .cloned()
            .collect()
    }

    pub fn invitations(&self) -> Vec<Invitation> {
        self.lock().invitations.clone()
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl FamilyStore for FakeFamilyStore {
    async fn create_family(&self, _caller: Caller<'_>, name: &FamilyName) -> FamilyResult<Family> {
        self.record_write();
        let mut state = self.lock();
        let family = Family {
            id: FamilyId::from_db(Self::next_id(&mut state, "family")),
            name: name.to_string(),
        };
        state.families.push(family.clone());
        Ok(family)
    }

    async fn add_member(
        &self,
        caller: Caller<'_>,
        family_id: &FamilyId,
        role: MemberRole,
    ) -> FamilyResult<()> {
        self.record_write();
        let mut state = self.lock();
        let duplicate = state
            .members
            .iter()
            .any(|m| &m.family_id == family_id && m.user_id == caller.user_id);
        if duplicate {
            return Err(FamilyError::AlreadyMember);
        }
        state.members.push(MemberRecord {
            family_id: family_id.clone(),
            user_id: caller.user_id.to_string(),
            role,
        });
        Ok(())
    }

    async fn add_children(
        &self,
        _caller: Caller<'_>,
        family_id: &FamilyId,
        children: &[NewChild],
    ) -> FamilyResult<()> {
        self.record_write();
        let mut state = self.lock();
        for child in children {
            let id = Self::next_id(&mut state, "child");
            state.children.push(Child {
                id,
                family_id: family_id.clone(),
                first_name: child.first_name.clone(),
                color: child.color.clone(),
            });
        }
        Ok(())
    }

    async fn create_invitation(&self, _caller: Caller<'_>, invitation: &Invitation) -> FamilyResult<()> {
        self.record_write();
        self.lock().invitations.push(invitation.clone());
        Ok(())
    }

    async fn find_invitation(
        &self,
        _caller: Caller<'_>,
        code: &InvitationCode,
    ) -> FamilyResult<Option<Invitation>> {
        Ok(self
            .lock()
            .invitations
            .iter()
            .find(|i| &i.code == code)
            .cloned())
    }

    async fn memberships(&self, caller: Caller<'_>) -> FamilyResult<Vec<Membership>> {
        let state = self.lock();
        Ok(state
            .members
            .iter()
            .filter(|m| m.user_id == caller.user_id)
            .filter_map(|m| {
                state
                    .families
                    .iter()
                    .find(|f| f.id == m.family_id)
                    .map(|family| Membership {
                        family: family.clone(),
                        role: m.role,
                    })
            })
            .collect())
    }

    async fn find_profile(&self, caller: Caller<'_>) -> FamilyResult<Option<Profile>> {
        Ok(self
            .lock()
            .profiles
            .iter()
            .find(|p| p.id == caller.user_id)
            .cloned())
    }

    async fn children(&self, _caller: Caller<'_>, family_id: &FamilyId) -> FamilyResult<Vec<Child>> {
        Ok(self.children_of(family_id))
    }
}
