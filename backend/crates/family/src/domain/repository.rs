//! Store Trait
//!
//! Persistence of families, memberships, children and invitations. Every call
//! is made on behalf of a signed-in user so the store can enforce row-level
//! access.

use auth::ResolvedSession;

use crate::domain::entity::{
    child::{Child, NewChild},
    family::Family,
    invitation::Invitation,
    membership::Membership,
    profile::Profile,
};
use crate::domain::value_object::{
    family_id::FamilyId, family_name::FamilyName, invitation_code::InvitationCode,
    member_role::MemberRole,
};
use crate::error::FamilyResult;

/// The user a store call is made for
#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    pub user_id: &'a str,
    pub access_token: &'a str,
}

impl<'a> From<&'a ResolvedSession> for Caller<'a> {
    fn from(session: &'a ResolvedSession) -> Self {
        Self {
            user_id: session.user.id.as_str(),
            access_token: &session.access_token,
        }
    }
}

#[trait_variant::make(FamilyStore: Send)]
pub trait LocalFamilyStore {
    async fn create_family(&self, caller: Caller<'_>, name: &FamilyName) -> FamilyResult<Family>;

    /// Add the caller to a family. Fails with `AlreadyMember` on a duplicate.
    async fn add_member(
        &self,
        caller: Caller<'_>,
        family_id: &FamilyId,
        role: MemberRole,
    ) -> FamilyResult<()>;

    async fn add_children(
        &self,
        caller: Caller<'_>,
        family_id: &FamilyId,
        children: &[NewChild],
    ) -> FamilyResult<()>;

    async fn create_invitation(&self, caller: Caller<'_>, invitation: &Invitation) -> FamilyResult<()>;

    async fn find_invitation(
        &self,
        caller: Caller<'_>,
        code: &InvitationCode,
    ) -> FamilyResult<Option<Invitation>>;

    /// Families of the caller, oldest membership first
    async fn memberships(&self, caller: Caller<'_>) -> FamilyResult<Vec<Membership>>;

    async fn find_profile(&self, caller: Caller<'_>) -> FamilyResult<Option<Profile>>;

    async fn children(&self, caller: Caller<'_>, family_id: &FamilyId) -> FamilyResult<Vec<Child>>;
}
