//! The seven character attributes.

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::key::normalize_key;
use crate::skill::Skill;

/// A character attribute. Every character carries all seven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Attribute {
    /// Speed and grace.
    Agility,
    /// Perception and instinct.
    Awareness,
    /// Strength and endurance.
    Brawn,
    /// Hand-eye coordination.
    Coordination,
    /// Reasoning and learning.
    Intelligence,
    /// Force of character.
    Personality,
    /// Mental fortitude.
    Willpower,
}

impl Attribute {
    /// All attributes in sheet order.
    pub const ALL: [Attribute; 7] = [
        Self::Agility,
        Self::Awareness,
        Self::Brawn,
        Self::Coordination,
        Self::Intelligence,
        Self::Personality,
        Self::Willpower,
    ];

    /// Display name, as printed on the sheet.
    pub fn name(self) -> &'static str {
        match self {
            Self::Agility => "Agility",
            Self::Awareness => "Awareness",
            Self::Brawn => "Brawn",
            Self::Coordination => "Coordination",
            Self::Intelligence => "Intelligence",
            Self::Personality => "Personality",
            Self::Willpower => "Willpower",
        }
    }

    /// Parse an attribute from table text, ignoring case and punctuation.
    pub fn parse(s: &str) -> Option<Self> {
        let key = normalize_key(s);
        Self::ALL.into_iter().find(|a| normalize_key(a.name()) == key)
    }

    /// Skills governed by this attribute, in sheet order.
    pub fn skills(self) -> impl Iterator<Item = Skill> {
        Skill::ALL.into_iter().filter(move |s| s.attribute() == self)
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Attribute {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(TableError::UnknownAttribute(value))
    }
}

impl From<Attribute> for String {
    fn from(value: Attribute) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_lenient() {
        assert_eq!(Attribute::parse("Brawn"), Some(Attribute::Brawn));
        assert_eq!(Attribute::parse(" willpower."), Some(Attribute::Willpower));
        assert_eq!(Attribute::parse("Luck"), None);
    }

    #[test]
    fn every_skill_has_one_governing_attribute() {
        let total: usize = Attribute::ALL.iter().map(|a| a.skills().count()).sum();
        assert_eq!(total, Skill::ALL.len());
    }

    #[test]
    fn brawn_governs_athletics_and_resistance() {
        let skills: Vec<_> = Attribute::Brawn.skills().collect();
        assert_eq!(skills, vec![Skill::Athletics, Skill::Resistance]);
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&Attribute::Coordination).unwrap();
        assert_eq!(json, "\"Coordination\"");
        let back: Attribute = serde_json::from_str("\"coordination\"").unwrap();
        assert_eq!(back, Attribute::Coordination);
        assert!(serde_json::from_str::<Attribute>("\"Luck\"").is_err());
    }
}
