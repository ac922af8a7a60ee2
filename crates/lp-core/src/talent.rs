//! Talent definitions and their prerequisites.

use serde::Deserialize;

use crate::attribute::Attribute;
use crate::error::{TableError, TableResult};
use crate::skill::Skill;

/// A single prerequisite clause of a talent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prerequisite {
    /// Another talent that must already be owned.
    Talent(String),
    /// An "A or B" clause listing alternative talents.
    AnyTalent(Vec<String>),
    /// Minimum ranks in a skill. A zero threshold is not checked.
    SkillRank {
        /// Skill being tested.
        skill: Skill,
        /// Minimum experience rank.
        expertise: u32,
        /// Minimum focus rank.
        focus: u32,
    },
}

impl Prerequisite {
    /// Parse one comma-free clause of a prerequisite list.
    ///
    /// Recognized shapes: `"<skill> focus <N>"`, `"<skill> expertise <N>"`,
    /// `"<A> or <B>"`; anything else names a required talent.
    pub fn parse(clause: &str) -> TableResult<Self> {
        let clause = clause.trim();
        let words: Vec<&str> = clause.split_whitespace().collect();

        if let [skill_words @ .., kind, rank] = words.as_slice() {
            let kind = kind.to_lowercase();
            if kind == "focus" || kind == "expertise" {
                let skill = Skill::parse(&skill_words.join(" "))
                    .ok_or_else(|| TableError::UnknownSkill(skill_words.join(" ")))?;
                let rank: u32 = rank
                    .parse()
                    .map_err(|_| TableError::malformed("prerequisite rank", clause))?;
                return Ok(if kind == "focus" {
                    Self::SkillRank {
                        skill,
                        expertise: 0,
                        focus: rank,
                    }
                } else {
                    Self::SkillRank {
                        skill,
                        expertise: rank,
                        focus: 0,
                    }
                });
            }
        }

        let mut branches: Vec<String> = clause
            .split(" or ")
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();
        if branches.len() > 1 {
            return Ok(Self::AnyTalent(branches));
        }
        branches
            .pop()
            .map(Self::Talent)
            .ok_or_else(|| TableError::malformed("prerequisite", clause))
    }
}

/// Parse a comma-separated prerequisite list. `"None"` and blank text mean
/// no prerequisites.
pub fn parse_prerequisites(text: &str) -> TableResult<Vec<Prerequisite>> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }
    text.split(',')
        .filter(|c| !c.trim().is_empty())
        .map(Prerequisite::parse)
        .collect()
}

/// A talent as defined in the content tables. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawTalent")]
pub struct TalentDefinition {
    /// Talent name.
    pub name: String,
    /// Skill the talent belongs to.
    pub skill: Skill,
    /// Attribute governing that skill.
    pub attribute: Attribute,
    /// Every clause that must hold before the talent can be taken.
    pub prerequisites: Vec<Prerequisite>,
    /// How many ranks the talent can have.
    pub max_ranks: u32,
    /// Cost tier; each tier adds 200 XP to the price.
    pub tier: u32,
    /// Rules text.
    pub description: String,
}

impl std::fmt::Display for TalentDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, tier {})", self.name, self.skill, self.tier)
    }
}

#[derive(Deserialize)]
struct RawTalent {
    name: String,
    skill: Skill,
    #[serde(default)]
    prerequisites: String,
    #[serde(default = "one")]
    max_ranks: u32,
    #[serde(default = "one")]
    tier: u32,
    #[serde(default)]
    description: String,
}

fn one() -> u32 {
    1
}

impl TryFrom<RawTalent> for TalentDefinition {
    type Error = TableError;

    fn try_from(raw: RawTalent) -> Result<Self, Self::Error> {
        Ok(Self {
            prerequisites: parse_prerequisites(&raw.prerequisites)?,
            attribute: raw.skill.attribute(),
            name: raw.name.trim().to_string(),
            skill: raw.skill,
            max_ranks: raw.max_ranks,
            tier: raw.tier,
            description: raw.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_focus_and_expertise() {
        assert_eq!(
            Prerequisite::parse("Melee focus 2").unwrap(),
            Prerequisite::SkillRank {
                skill: Skill::Melee,
                expertise: 0,
                focus: 2
            }
        );
        assert_eq!(
            Prerequisite::parse("Animal Handling Expertise 1").unwrap(),
            Prerequisite::SkillRank {
                skill: Skill::AnimalHandling,
                expertise: 1,
                focus: 0
            }
        );
    }

    #[test]
    fn parse_or_clause() {
        assert_eq!(
            Prerequisite::parse("Steely Glare or Menacing").unwrap(),
            Prerequisite::AnyTalent(vec!["Steely Glare".into(), "Menacing".into()])
        );
    }

    #[test]
    fn parse_bare_talent_name() {
        assert_eq!(
            Prerequisite::parse(" Sure Footed ").unwrap(),
            Prerequisite::Talent("Sure Footed".into())
        );
    }

    #[test]
    fn parse_unknown_skill_threshold_fails() {
        assert!(matches!(
            Prerequisite::parse("Juggling focus 2"),
            Err(TableError::UnknownSkill(_))
        ));
        assert!(Prerequisite::parse("Melee focus two").is_err());
    }

    #[test]
    fn parse_list() {
        let list = parse_prerequisites("Brawn Bash, Athletics expertise 2").unwrap();
        assert_eq!(list.len(), 2);
        assert!(parse_prerequisites("None").unwrap().is_empty());
        assert!(parse_prerequisites("  ").unwrap().is_empty());
    }

    #[test]
    fn definition_from_json() {
        let def: TalentDefinition = serde_json::from_str(
            r#"{"name": "Hard Target", "skill": "Resistance", "prerequisites": "Iron Hide", "tier": 2}"#,
        )
        .unwrap();
        assert_eq!(def.attribute, Attribute::Brawn);
        assert_eq!(def.tier, 2);
        assert_eq!(def.max_ranks, 1);
        assert_eq!(def.prerequisites, vec![Prerequisite::Talent("Iron Hide".into())]);
    }
}
