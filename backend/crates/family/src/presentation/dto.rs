//! Family DTOs

use serde::{Deserialize, Serialize};

use crate::application::add_children::ChildInput;
use crate::domain::value_object::family_id::FamilyId;

#[derive(Debug, Default, Deserialize)]
pub struct StepQuery {
    pub family_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JoinQuery {
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFamilyForm {
    #[serde(default)]
    pub family_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChildEntry {
    #[serde(default)]
    pub first_name: String,
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChildrenForm {
    #[serde(default)]
    pub children: Vec<ChildEntry>,
}

impl ChildrenForm {
    pub fn into_inputs(self) -> Vec<ChildInput> {
        self.children
            .into_iter()
            .map(|c| ChildInput {
                first_name: c.first_name,
                color: c.color,
            })
            .collect()
    }
}

/// Page view of an onboarding step
#[derive(Debug, Serialize)]
pub struct StepView {
    pub page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_id: Option<FamilyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_colors: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub celebrate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_path: Option<String>,
}

impl StepView {
    pub fn new(page: &'static str, family_id: Option<FamilyId>) -> Self {
        Self {
            page,
            family_id,
            preset_colors: None,
            celebrate: false,
            dashboard_path: None,
        }
    }
}
