//! Invitation Entity

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{family_id::FamilyId, invitation_code::InvitationCode};

/// Days an invitation stays valid
pub const INVITATION_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub code: InvitationCode,
    pub family_id: FamilyId,
    /// User id of the inviting parent
    pub created_by: String,
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    pub fn issue(family_id: FamilyId, created_by: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            code: InvitationCode::generate(),
            family_id,
            created_by: created_by.into(),
            expires_at: now + Duration::days(INVITATION_TTL_DAYS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
