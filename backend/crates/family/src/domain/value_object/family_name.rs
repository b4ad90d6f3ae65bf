use derive_more::Display;
use serde::Serialize;

use crate::error::{FamilyError, FamilyResult};

const FAMILY_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct FamilyName(String);

impl FamilyName {
    pub fn new(raw: &str) -> FamilyResult<Self> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(FamilyError::Validation(
                "Please enter a name for your family".into(),
            ));
        }

        if name.chars().count() > FAMILY_NAME_MAX_LENGTH {
            return Err(FamilyError::Validation(format!(
                "The family name must be at most {FAMILY_NAME_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
