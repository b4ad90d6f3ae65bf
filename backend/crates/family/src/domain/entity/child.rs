//! Child Entity

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{color::HexColor, family_id::FamilyId};

/// A child to be added to a family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChild {
    pub first_name: String,
    pub color: HexColor,
}

impl NewChild {
    /// Build the rows to insert from the submitted entries.
    ///
    /// Entries with a blank name are dropped. A missing or malformed colour
    /// falls back to the palette colour for the entry's position.
    pub fn from_entries<'a, I>(entries: I) -> Vec<NewChild>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, (first_name, color))| {
                let first_name = first_name.trim();
                if first_name.is_empty() {
                    return None;
                }
                let color = color
                    .and_then(HexColor::parse)
                    .unwrap_or_else(|| HexColor::preset(index));
                Some(NewChild {
                    first_name: first_name.to_string(),
                    color,
                })
            })
            .collect()
    }
}

/// A stored child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub family_id: FamilyId,
    pub first_name: String,
    pub color: HexColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_names_are_dropped() {
        let children = NewChild::from_entries([("  ", Some("#FF5733")), ("", None)]);
        assert!(children.is_empty());
    }

    #[test]
    fn test_names_trimmed_and_colours_defaulted() {
        let children = NewChild::from_entries([
            (" Mia ", Some("#33a8ff")),
            ("", None),
            ("Leo", Some("red")),
        ]);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].first_name, "Mia");
        assert_eq!(children[0].color.as_str(), "#33A8FF");
        assert_eq!(children[1].first_name, "Leo");
        assert_eq!(children[1].color, HexColor::preset(2));
    }
}
