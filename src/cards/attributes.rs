//! Elemental monster attributes.
//!
//! A monster's attribute decides how its side's terrain modifies its
//! ATK and DEF (see [`crate::terrain`]).

use serde::{Deserialize, Serialize};

/// Elemental attribute of a monster template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[default]
    None,
    Fire,
    Water,
    Wind,
    Earth,
    Light,
    Dark,
}

impl Attribute {
    /// Every attribute, in declaration order.
    pub const ALL: [Attribute; 7] = [
        Attribute::None,
        Attribute::Fire,
        Attribute::Water,
        Attribute::Wind,
        Attribute::Earth,
        Attribute::Light,
        Attribute::Dark,
    ];

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Attribute::None => "none",
            Attribute::Fire => "fire",
            Attribute::Water => "water",
            Attribute::Wind => "wind",
            Attribute::Earth => "earth",
            Attribute::Light => "light",
            Attribute::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(Attribute::default(), Attribute::None);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Attribute::ALL.iter().map(|a| a.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Attribute::ALL.len());
        assert_eq!(format!("{}", Attribute::Fire), "fire");
    }
}
