//! Child colour
//!
//! Colours tag a child's events in the calendar. The picker offers a fixed
//! palette; any `#RRGGBB` value is accepted.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Palette offered by the add-children step, in display order
pub const PRESET_COLORS: &[&str] = &[
    "#FF5733", "#33A8FF", "#33FF57", "#FF33A8", "#A833FF", "#FFD433", "#33FFD4", "#FF8333",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// `#RRGGBB`, normalised to upper case
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let hex = raw.strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("#{}", hex.to_ascii_uppercase())))
    }

    /// Palette colour for the child at `index`, cycling
    pub fn preset(index: usize) -> Self {
        Self(PRESET_COLORS[index % PRESET_COLORS.len()].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
