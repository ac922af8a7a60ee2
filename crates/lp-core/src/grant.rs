//! Typed grant fields carried by archetype, nature and education rows.
//!
//! The source books phrase grants as prose ("+1 Expertise and +1 Focus to
//! the following skills: Lore, Craft, or Healing"). Each phrase is parsed
//! once, when tables are loaded, into a [`GrantFields`] value.

use serde::Deserialize;

use crate::attribute::Attribute;
use crate::error::{TableError, TableResult};
use crate::skill::Skill;

/// A reference to a skill inside a grant, possibly a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillRef {
    /// A concrete skill.
    Named(Skill),
    /// "your character's career skill": whatever the archetype granted.
    CareerSkill,
    /// "a random career skill (roll on Archetype table)".
    RandomCareerSkill,
}

impl SkillRef {
    /// Parse one list item from table text.
    pub fn parse(text: &str) -> TableResult<Self> {
        let lower = text.to_lowercase();
        if lower.contains("random career skill") {
            return Ok(Self::RandomCareerSkill);
        }
        if lower.contains("career skill") {
            return Ok(Self::CareerSkill);
        }
        Skill::parse(text)
            .map(Self::Named)
            .ok_or_else(|| TableError::UnknownSkill(text.trim().to_string()))
    }
}

impl std::fmt::Display for SkillRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(skill) => write!(f, "{skill}"),
            Self::CareerSkill => write!(f, "your character's career skill"),
            Self::RandomCareerSkill => write!(f, "a random career skill"),
        }
    }
}

/// A talent granted outright, with its page reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerTalent {
    /// Talent name.
    pub name: String,
    /// Where the talent is described (e.g. "page 12").
    pub page: String,
}

/// Everything a life-path row can grant. Absent parts are `None` or empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawGrantFields")]
pub struct GrantFields {
    /// Talent granted unconditionally.
    pub career_talent: Option<CareerTalent>,
    /// The character's main skill, credited +2/+2.
    pub career_skill: Option<Skill>,
    /// Skills credited +1/+1 each.
    pub mandatory_skills: Vec<SkillRef>,
    /// Pool from which two skills are chosen, +1/+1 each.
    pub elective_skills: Vec<SkillRef>,
    /// Whether the row grants one free talent tied to its skills.
    pub talent_choice: bool,
    /// Equipment lines, appended verbatim.
    pub equipment: Vec<String>,
    /// Attribute raised by one.
    pub attribute_improvement: Option<Attribute>,
}

impl GrantFields {
    /// A grant holding only a career skill.
    pub fn career_skill_only(skill: Skill) -> Self {
        Self {
            career_skill: Some(skill),
            ..Self::default()
        }
    }
}

/// Detail row for an archetype, nature or education: prose plus grants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Described {
    /// Prose description used in the narrative.
    pub description: String,
    /// What the row grants.
    #[serde(flatten)]
    pub grants: GrantFields,
}

#[derive(Deserialize)]
struct RawGrantFields {
    careertalent: Option<String>,
    careerskill: Option<String>,
    mandatoryskills: Option<String>,
    electiveskills: Option<String>,
    talent: Option<String>,
    equipment: Option<String>,
    attributeimprovement: Option<String>,
}

impl TryFrom<RawGrantFields> for GrantFields {
    type Error = TableError;

    fn try_from(raw: RawGrantFields) -> Result<Self, Self::Error> {
        Ok(Self {
            career_talent: raw.careertalent.as_deref().map(parse_career_talent),
            career_skill: raw
                .careerskill
                .as_deref()
                .map(parse_career_skill)
                .transpose()?,
            mandatory_skills: raw
                .mandatoryskills
                .as_deref()
                .map(|t| parse_skill_list(t, " to ", "mandatory skills"))
                .transpose()?
                .unwrap_or_default(),
            elective_skills: raw
                .electiveskills
                .as_deref()
                .map(|t| parse_skill_list(t, "following skills: ", "elective skills"))
                .transpose()?
                .unwrap_or_default(),
            talent_choice: raw.talent.is_some(),
            equipment: raw
                .equipment
                .as_deref()
                .map(|t| {
                    t.lines()
                        .map(str::trim)
                        .filter(|l| !l.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            attribute_improvement: raw
                .attributeimprovement
                .as_deref()
                .map(parse_attribute_improvement)
                .transpose()?,
        })
    }
}

/// `"Name (page 12)"` → name and page reference.
pub fn parse_career_talent(text: &str) -> CareerTalent {
    match text.split_once('(') {
        Some((name, page)) => CareerTalent {
            name: name.trim().to_string(),
            page: page.replace(')', "").trim().to_string(),
        },
        None => CareerTalent {
            name: text.trim().to_string(),
            page: String::new(),
        },
    }
}

/// `"+2 Expertise and +2 Focus in the Survival skill"` → `Survival`.
pub fn parse_career_skill(text: &str) -> TableResult<Skill> {
    let name = match text.split_once("in the ") {
        Some((_, rest)) => rest.replace(" skill", ""),
        None => text.to_string(),
    };
    Skill::parse(&name).ok_or(TableError::UnknownSkill(name.trim().to_string()))
}

/// Split the list that follows `marker` into skill references.
///
/// Conjunctions (", or ", ", and ", " and ", " or ") and trailing page
/// references are dropped.
pub fn parse_skill_list(
    text: &str,
    marker: &str,
    field: &'static str,
) -> TableResult<Vec<SkillRef>> {
    let (_, list) = text
        .split_once(marker)
        .ok_or_else(|| TableError::malformed(field, text))?;
    list.replace(", or ", ", ")
        .replace(", and ", ", ")
        .split(", ")
        .flat_map(|item| item.split(" and "))
        .flat_map(|item| item.split(" or "))
        .map(|item| item.trim().trim_end_matches('.'))
        .filter(|item| !item.is_empty() && !item.starts_with("page "))
        .map(SkillRef::parse)
        .collect()
}

/// `"+1 to Brawn"` → `Brawn`.
pub fn parse_attribute_improvement(text: &str) -> TableResult<Attribute> {
    let name = text.split_once(" to ").map_or(text, |(_, rest)| rest);
    Attribute::parse(name).ok_or_else(|| TableError::UnknownAttribute(name.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn career_talent_with_page() {
        let t = parse_career_talent("Born in the Saddle (page 34)");
        assert_eq!(t.name, "Born in the Saddle");
        assert_eq!(t.page, "page 34");
    }

    #[test]
    fn career_skill_phrase() {
        assert_eq!(
            parse_career_skill("+2 Expertise and +2 Focus in the Ranged Weapons skill").unwrap(),
            Skill::RangedWeapons
        );
        assert!(parse_career_skill("+2 in the Juggling skill").is_err());
    }

    #[test]
    fn mandatory_list_with_placeholder() {
        let skills = parse_skill_list(
            "+1 Expertise and +1 Focus to Craft, Lore, and your character’s career skill",
            " to ",
            "mandatory skills",
        )
        .unwrap();
        assert_eq!(
            skills,
            vec![
                SkillRef::Named(Skill::Craft),
                SkillRef::Named(Skill::Lore),
                SkillRef::CareerSkill,
            ]
        );
    }

    #[test]
    fn elective_list_with_random_placeholder() {
        let skills = parse_skill_list(
            "+1 Expertise and +1 Focus to two of the following skills: Parry, Sailing, or a random career skill (roll on Archetype table), page 23",
            "following skills: ",
            "elective skills",
        )
        .unwrap();
        assert_eq!(
            skills,
            vec![
                SkillRef::Named(Skill::Parry),
                SkillRef::Named(Skill::Sailing),
                SkillRef::RandomCareerSkill,
            ]
        );
    }

    #[test]
    fn missing_marker_is_malformed() {
        let err = parse_skill_list("Lore, Craft", "following skills: ", "elective skills")
            .unwrap_err();
        assert!(matches!(err, TableError::Malformed { field: "elective skills", .. }));
    }

    #[test]
    fn attribute_improvement_phrase() {
        assert_eq!(
            parse_attribute_improvement("+1 to Willpower").unwrap(),
            Attribute::Willpower
        );
    }

    #[test]
    fn grant_fields_from_json() {
        let d: Described = serde_json::from_str(
            r#"{
                "description": "You ride before you walk.",
                "careertalent": "Born in the Saddle (page 34)",
                "careerskill": "+2 Expertise and +2 Focus in the Animal Handling skill",
                "electiveskills": "+1 to two of the following skills: Survival, Athletics, or Melee",
                "talent": "Any one talent from the skills above",
                "equipment": "A horse\nA saddle blanket\n",
                "attributeimprovement": "+1 to Agility"
            }"#,
        )
        .unwrap();
        let g = d.grants;
        assert_eq!(g.career_skill, Some(Skill::AnimalHandling));
        assert_eq!(g.elective_skills.len(), 3);
        assert!(g.mandatory_skills.is_empty());
        assert!(g.talent_choice);
        assert_eq!(g.equipment, vec!["A horse", "A saddle blanket"]);
        assert_eq!(g.attribute_improvement, Some(Attribute::Agility));
    }
}
