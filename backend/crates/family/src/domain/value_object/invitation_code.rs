//! Invitation Code
//!
//! Short code a co-parent types or follows to join a family. The alphabet
//! leaves out `I`, `O`, `0` and `1`, which are easy to confuse when read aloud.

use derive_more::Display;
use platform::crypto::random_code;
use serde::{Deserialize, Serialize};

pub const INVITATION_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const INVITATION_CODE_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct InvitationCode(String);

impl InvitationCode {
    pub fn generate() -> Self {
        Self(random_code(INVITATION_CODE_LENGTH, INVITATION_ALPHABET))
    }

    /// Normalise a code typed by a user. Unknown codes are caught by the lookup.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let code = raw?.trim().to_ascii_uppercase();
        if code.is_empty() {
            return None;
        }
        Some(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
