use serde::Serialize;

use crate::domain::entity::family::Family;
use crate::domain::value_object::member_role::MemberRole;

/// A family the user belongs to, with the user's role in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Membership {
    pub family: Family,
    pub role: MemberRole,
}
