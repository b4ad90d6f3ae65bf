use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identifier of a family record; the onboarding cursor carried in `family_id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct FamilyId(String);

impl FamilyId {
    /// Accept a raw query value; blank or missing values are no cursor at all.
    /// A usable value is kept exactly as received.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    /// From a store row (already valid)
    pub fn from_db(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(FamilyId::parse(Some("abc123")).unwrap().as_str(), "abc123");
        assert_eq!(FamilyId::parse(Some(" abc123 ")).unwrap().as_str(), " abc123 ");
        assert!(FamilyId::parse(Some("   ")).is_none());
        assert!(FamilyId::parse(Some("")).is_none());
        assert!(FamilyId::parse(None).is_none());
    }
}
