//! Skills and their governing attributes.

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::error::TableError;
use crate::key::normalize_key;

/// A trained skill. Each skill is governed by exactly one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[allow(missing_docs)]
pub enum Skill {
    Acrobatics,
    Melee,
    Stealth,
    Parry,
    RangedWeapons,
    Sailing,
    Insight,
    Observation,
    Survival,
    Thievery,
    Alchemy,
    Craft,
    Healing,
    Linguistics,
    Warfare,
    Lore,
    Athletics,
    Resistance,
    Discipline,
    Sorcery,
    AnimalHandling,
    Command,
    Counsel,
    Persuade,
    Society,
}

impl Skill {
    /// All skills, grouped by governing attribute.
    pub const ALL: [Skill; 25] = [
        Self::Acrobatics,
        Self::Melee,
        Self::Stealth,
        Self::Parry,
        Self::RangedWeapons,
        Self::Sailing,
        Self::Insight,
        Self::Observation,
        Self::Survival,
        Self::Thievery,
        Self::Alchemy,
        Self::Craft,
        Self::Healing,
        Self::Linguistics,
        Self::Warfare,
        Self::Lore,
        Self::Athletics,
        Self::Resistance,
        Self::Discipline,
        Self::Sorcery,
        Self::AnimalHandling,
        Self::Command,
        Self::Counsel,
        Self::Persuade,
        Self::Society,
    ];

    /// Display name, as printed on the sheet.
    pub fn name(self) -> &'static str {
        match self {
            Self::Acrobatics => "Acrobatics",
            Self::Melee => "Melee",
            Self::Stealth => "Stealth",
            Self::Parry => "Parry",
            Self::RangedWeapons => "Ranged Weapons",
            Self::Sailing => "Sailing",
            Self::Insight => "Insight",
            Self::Observation => "Observation",
            Self::Survival => "Survival",
            Self::Thievery => "Thievery",
            Self::Alchemy => "Alchemy",
            Self::Craft => "Craft",
            Self::Healing => "Healing",
            Self::Linguistics => "Linguistics",
            Self::Warfare => "Warfare",
            Self::Lore => "Lore",
            Self::Athletics => "Athletics",
            Self::Resistance => "Resistance",
            Self::Discipline => "Discipline",
            Self::Sorcery => "Sorcery",
            Self::AnimalHandling => "Animal Handling",
            Self::Command => "Command",
            Self::Counsel => "Counsel",
            Self::Persuade => "Persuade",
            Self::Society => "Society",
        }
    }

    /// The attribute this skill is rolled with.
    pub fn attribute(self) -> Attribute {
        match self {
            Self::Acrobatics | Self::Melee | Self::Stealth => Attribute::Agility,
            Self::Parry | Self::RangedWeapons | Self::Sailing => Attribute::Coordination,
            Self::Insight | Self::Observation | Self::Survival | Self::Thievery => {
                Attribute::Awareness
            }
            Self::Alchemy
            | Self::Craft
            | Self::Healing
            | Self::Linguistics
            | Self::Warfare
            | Self::Lore => Attribute::Intelligence,
            Self::Athletics | Self::Resistance => Attribute::Brawn,
            Self::Discipline | Self::Sorcery => Attribute::Willpower,
            Self::AnimalHandling
            | Self::Command
            | Self::Counsel
            | Self::Persuade
            | Self::Society => Attribute::Personality,
        }
    }

    /// Parse a skill from table text, ignoring case, spacing and punctuation.
    pub fn parse(s: &str) -> Option<Self> {
        let key = normalize_key(s);
        if key.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|sk| normalize_key(sk.name()) == key)
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Skill {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(TableError::UnknownSkill(value))
    }
}

impl From<Skill> for String {
    fn from(value: Skill) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_multi_word_names() {
        assert_eq!(Skill::parse("Ranged Weapons"), Some(Skill::RangedWeapons));
        assert_eq!(Skill::parse("animal handling"), Some(Skill::AnimalHandling));
        assert_eq!(Skill::parse("  Lore "), Some(Skill::Lore));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(Skill::parse("Juggling"), None);
        assert_eq!(Skill::parse(""), None);
    }

    #[test]
    fn governing_attributes() {
        assert_eq!(Skill::Resistance.attribute(), Attribute::Brawn);
        assert_eq!(Skill::Discipline.attribute(), Attribute::Willpower);
        assert_eq!(Skill::Society.attribute(), Attribute::Personality);
        assert_eq!(Skill::Sailing.attribute(), Attribute::Coordination);
    }

    #[test]
    fn names_round_trip_through_parse() {
        for skill in Skill::ALL {
            assert_eq!(Skill::parse(skill.name()), Some(skill));
        }
    }
}
