//! The content tables a life path is rolled against.
//!
//! Tables are loaded once from JSON and never change afterwards. Each
//! accessor fixes the lookup discipline for its table: numeric tables use a
//! range-floor lookup, description tables a normalized-name lookup.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::attribute::Attribute;
use crate::error::{TableError, TableResult};
use crate::grant::{Described, SkillRef, parse_skill_list};
use crate::skill::Skill;
use crate::table::{NameTable, RangeTable};
use crate::talent::TalentDefinition;

const BUNDLED_TABLES: &str = include_str!("../data/tables.json");

/// Step 1 row: where the character was born.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HomelandRow {
    /// Homeland name.
    pub name: String,
    /// Talent every native receives.
    pub talent: String,
    /// Starting language.
    pub language: String,
}

/// Step 2 row: an attribute archetype.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttributeRow {
    /// Descriptive aspect ("Strong", "Cunning", ...).
    pub aspect: String,
    /// The two attributes that always improve.
    pub mandatory: [Attribute; 2],
    /// The two attributes of which one improves.
    pub optional: [Attribute; 2],
}

/// Step 3 row: social caste.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CasteRow {
    /// Caste name.
    pub name: String,
    /// Talents granted by the caste.
    #[serde(deserialize_with = "comma_list")]
    pub talents: Vec<String>,
    /// Skill credited +1/+1.
    pub skill: Skill,
    /// Change to social standing; may be negative.
    pub standing: i32,
}

/// Step 4 row: the story behind the caste.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoryRow {
    /// Story name.
    pub name: String,
    /// Character trait that the story leaves behind.
    #[serde(rename = "trait")]
    pub trait_: String,
}

/// Step 8 row: what the character did at war.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawWarStory")]
pub struct WarStoryRow {
    /// Story text as printed in the table.
    pub story: String,
    /// Skills credited +1/+1.
    pub skills: Vec<SkillRef>,
}

#[derive(Deserialize)]
struct RawWarStory {
    story: String,
    bonus: String,
}

impl TryFrom<RawWarStory> for WarStoryRow {
    type Error = TableError;

    fn try_from(raw: RawWarStory) -> Result<Self, Self::Error> {
        Ok(Self {
            skills: parse_skill_list(&raw.bonus, " to ", "war story bonus")?,
            story: raw.story,
        })
    }
}

/// All content tables.
#[derive(Debug, Clone, Deserialize)]
pub struct TableStore {
    homelands: RangeTable<HomelandRow>,
    homeland_talents: NameTable<String>,
    attributes: RangeTable<AttributeRow>,
    castes: RangeTable<CasteRow>,
    caste_descriptions: NameTable<String>,
    caste_talents: NameTable<String>,
    caste_stories: NameTable<RangeTable<StoryRow>>,
    caste_story_descriptions: NameTable<NameTable<String>>,
    archetypes: RangeTable<String>,
    archetype_details: NameTable<Described>,
    natures: RangeTable<String>,
    nature_details: NameTable<Described>,
    educations: RangeTable<String>,
    education_details: NameTable<Described>,
    war_stories: RangeTable<WarStoryRow>,
    garments: RangeTable<String>,
    belongings: RangeTable<String>,
    weapons: RangeTable<String>,
    provenances: RangeTable<String>,
    #[serde(deserialize_with = "talent_catalog")]
    talents: NameTable<TalentDefinition>,
}

impl TableStore {
    /// Parse tables from a JSON document.
    pub fn from_json_str(json: &str) -> TableResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON table file.
    pub fn load(path: &Path) -> TableResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The table set that ships with Lifepath.
    pub fn bundled() -> TableResult<Self> {
        Self::from_json_str(BUNDLED_TABLES)
    }

    /// Step 1: homeland for a 2d20 total.
    pub fn homeland(&self, roll: u32) -> TableResult<&HomelandRow> {
        self.homelands.lookup("homelands", roll)
    }

    /// Rules text of a homeland talent, if the table has it.
    pub fn homeland_talent(&self, name: &str) -> Option<&str> {
        self.homeland_talents.get(name).map(String::as_str)
    }

    /// Step 2: attribute row for a d20.
    pub fn attribute_row(&self, roll: u32) -> TableResult<&AttributeRow> {
        self.attributes.lookup("attributes", roll)
    }

    /// Step 3: caste for a d20.
    pub fn caste(&self, roll: u32) -> TableResult<&CasteRow> {
        self.castes.lookup("castes", roll)
    }

    /// Prose description of a caste.
    pub fn caste_description(&self, caste: &str) -> Option<&str> {
        self.caste_descriptions.get(caste).map(String::as_str)
    }

    /// Rules text of a caste talent.
    pub fn caste_talent(&self, name: &str) -> Option<&str> {
        self.caste_talents.get(name).map(String::as_str)
    }

    /// Step 4: story for a caste and a d20. The caste must have a story table.
    pub fn caste_story(&self, caste: &str, roll: u32) -> TableResult<&StoryRow> {
        self.caste_stories
            .require("caste stories", caste)?
            .lookup("caste stories", roll)
    }

    /// Prose description of a caste story.
    pub fn caste_story_description(&self, caste: &str, story: &str) -> Option<&str> {
        self.caste_story_descriptions
            .get(caste)
            .and_then(|stories| stories.get(story))
            .map(String::as_str)
    }

    /// Step 5: archetype name for a d20.
    pub fn archetype(&self, roll: u32) -> TableResult<&str> {
        self.archetypes.lookup("archetypes", roll).map(String::as_str)
    }

    /// Description and grants of an archetype.
    pub fn archetype_details(&self, name: &str) -> TableResult<&Described> {
        self.archetype_details.require("archetype details", name)
    }

    /// Step 6: nature name for a d20.
    pub fn nature(&self, roll: u32) -> TableResult<&str> {
        self.natures.lookup("natures", roll).map(String::as_str)
    }

    /// Description and grants of a nature.
    pub fn nature_details(&self, name: &str) -> TableResult<&Described> {
        self.nature_details.require("nature details", name)
    }

    /// Step 7: education name for a d20.
    pub fn education(&self, roll: u32) -> TableResult<&str> {
        self.educations.lookup("educations", roll).map(String::as_str)
    }

    /// Description and grants of an education. A missing entry is an error.
    pub fn education_details(&self, name: &str) -> TableResult<&Described> {
        self.education_details.require("education details", name)
    }

    /// Step 8: war story for a d20.
    pub fn war_story(&self, roll: u32) -> TableResult<&WarStoryRow> {
        self.war_stories.lookup("war stories", roll)
    }

    /// Step 9: garment for a d20.
    pub fn garment(&self, roll: u32) -> TableResult<&str> {
        self.garments.lookup("garments", roll).map(String::as_str)
    }

    /// Step 9: belonging for a d20.
    pub fn belonging(&self, roll: u32) -> TableResult<&str> {
        self.belongings.lookup("belongings", roll).map(String::as_str)
    }

    /// Step 9: weapon for a d20.
    pub fn weapon(&self, roll: u32) -> TableResult<&str> {
        self.weapons.lookup("weapons", roll).map(String::as_str)
    }

    /// Step 9: weapon provenance template for a d20.
    pub fn provenance(&self, roll: u32) -> TableResult<&str> {
        self.provenances.lookup("provenances", roll).map(String::as_str)
    }

    /// All talent definitions.
    pub fn talents(&self) -> impl Iterator<Item = &TalentDefinition> {
        self.talents.values()
    }

    /// A talent definition by name.
    pub fn talent(&self, name: &str) -> Option<&TalentDefinition> {
        self.talents.get(name)
    }
}

fn comma_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let text = String::deserialize(deserializer)?;
    Ok(text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

fn talent_catalog<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NameTable<TalentDefinition>, D::Error> {
    let defs = Vec::<TalentDefinition>::deserialize(deserializer)?;
    Ok(defs.into_iter().map(|d| (d.name.clone(), d)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TableStore {
        TableStore::bundled().unwrap()
    }

    #[test]
    fn bundled_tables_load() {
        let s = store();
        assert!(s.talents().count() >= 25);
    }

    #[test]
    fn d20_tables_cover_every_face() {
        let s = store();
        for roll in 1..=20 {
            assert!(s.attribute_row(roll).is_ok(), "attributes {roll}");
            let caste = s.caste(roll).unwrap();
            assert!(s.caste_story(&caste.name, roll).is_ok(), "story {roll}");
            let archetype = s.archetype(roll).unwrap();
            assert!(s.archetype_details(archetype).is_ok(), "{archetype}");
            let nature = s.nature(roll).unwrap();
            assert!(s.nature_details(nature).is_ok(), "{nature}");
            let education = s.education(roll).unwrap();
            assert!(s.education_details(education).is_ok(), "{education}");
            assert!(s.war_story(roll).is_ok());
            assert!(s.garment(roll).is_ok());
            assert!(s.belonging(roll).is_ok());
            assert!(s.weapon(roll).is_ok());
            assert!(s.provenance(roll).is_ok());
        }
    }

    #[test]
    fn homeland_covers_2d20() {
        let s = store();
        for roll in 2..=40 {
            assert!(s.homeland(roll).is_ok(), "homeland {roll}");
        }
        assert!(s.homeland(41).is_err());
    }

    #[test]
    fn every_talent_prerequisite_names_a_known_talent() {
        let s = store();
        for def in s.talents() {
            for pre in &def.prerequisites {
                let names: Vec<&String> = match pre {
                    crate::Prerequisite::Talent(name) => vec![name],
                    crate::Prerequisite::AnyTalent(names) => names.iter().collect(),
                    crate::Prerequisite::SkillRank { .. } => vec![],
                };
                for name in names {
                    assert!(s.talent(name).is_some(), "{} requires {name}", def.name);
                }
            }
        }
    }

    #[test]
    fn caste_talents_split_on_commas() {
        let json = r#"{"name": "Artisan", "talents": "Deft Hands, Guild Ties", "skill": "Craft", "standing": 1}"#;
        let row: CasteRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.talents, vec!["Deft Hands", "Guild Ties"]);
    }

    #[test]
    fn war_story_bonus_is_parsed() {
        let json = r#"{"story": "Looted", "bonus": "+1 Expertise and +1 Focus to Thievery and Stealth"}"#;
        let row: WarStoryRow = serde_json::from_str(json).unwrap();
        assert_eq!(
            row.skills,
            vec![SkillRef::Named(Skill::Thievery), SkillRef::Named(Skill::Stealth)]
        );
    }

    #[test]
    fn missing_education_details_is_an_error() {
        let err = store().education_details("Court of Owls").unwrap_err();
        assert!(matches!(err, TableError::MissingKey { table: "education details", .. }));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        assert!(matches!(
            TableStore::from_json_str("{\"homelands\": 3}"),
            Err(TableError::Json(_))
        ));
    }
}
