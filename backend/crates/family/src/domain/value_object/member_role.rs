use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Role of a user within a family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Created the family
    #[display("admin")]
    Admin,
    /// Joined through an invitation
    #[display("member")]
    Member,
}
