use serde::Serialize;

use crate::domain::value_object::family_id::FamilyId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
}
