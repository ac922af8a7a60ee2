//! The character record built by the life path.
//!
//! A [`CharacterState`] starts with every attribute at [`BASE_ATTRIBUTE`],
//! no skills and no talents. Generation only ever adds to it: ranks go up,
//! talents and equipment are appended, nothing is removed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::attribute::Attribute;
use crate::key::normalize_key;
use crate::skill::Skill;

/// Score every attribute starts at.
pub const BASE_ATTRIBUTE: u32 = 7;

/// Experience and focus ranks in one skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkillRanks {
    /// Experience rank.
    pub exp: u32,
    /// Focus rank.
    pub foc: u32,
}

/// All skills a character has ranks in. Unrecorded skills read as (0, 0).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillBook {
    ranks: BTreeMap<Skill, SkillRanks>,
}

impl SkillBook {
    /// Create an empty skill book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranks in a skill; (0, 0) if never credited.
    pub fn get(&self, skill: Skill) -> SkillRanks {
        self.ranks.get(&skill).copied().unwrap_or_default()
    }

    /// Credit ranks to a skill. Strictly additive.
    pub fn add(&mut self, skill: Skill, exp: u32, foc: u32) {
        let entry = self.ranks.entry(skill).or_default();
        entry.exp += exp;
        entry.foc += foc;
    }

    /// Returns true if the skill has a recorded entry.
    pub fn contains(&self, skill: Skill) -> bool {
        self.ranks.contains_key(&skill)
    }

    /// Recorded skills in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, SkillRanks)> + '_ {
        self.ranks.iter().map(|(s, r)| (*s, *r))
    }

    /// Number of recorded skills.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns true if no skill has been credited.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// A talent held by the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnedTalent {
    /// Talent name as granted.
    pub name: String,
    /// Rules text or page reference.
    pub text: String,
}

/// Talents in the order they were granted. Names are unique under
/// normalized comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Talents {
    owned: Vec<OwnedTalent>,
}

impl Talents {
    /// Create an empty talent list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a talent with this name (normalized) is held.
    pub fn has(&self, name: &str) -> bool {
        let key = normalize_key(name);
        self.owned.iter().any(|t| normalize_key(&t.name) == key)
    }

    /// Grant a talent. Returns false, leaving the list unchanged, if it is
    /// already held.
    pub fn grant(&mut self, name: &str, text: &str) -> bool {
        if self.has(name) {
            return false;
        }
        self.owned.push(OwnedTalent {
            name: name.trim().to_string(),
            text: text.trim().to_string(),
        });
        true
    }

    /// Held talents in grant order.
    pub fn iter(&self) -> impl Iterator<Item = &OwnedTalent> {
        self.owned.iter()
    }

    /// Number of held talents.
    pub fn len(&self) -> usize {
        self.owned.len()
    }

    /// Returns true if no talent is held.
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }
}

/// Character gender, chosen at the end of the life path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Gender {
    /// Options offered by the generator.
    pub const ALL: [Gender; 2] = [Self::Male, Self::Female];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Narrative results of the life-path steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Background {
    /// Step 1.
    pub homeland: String,
    /// Step 2: distinct aspects of the two attribute rows.
    pub aspects: Vec<String>,
    /// Step 3.
    pub caste: String,
    /// Step 3 prose.
    pub caste_description: String,
    /// Step 4.
    pub caste_story: String,
    /// Step 4 prose.
    pub caste_story_description: String,
    /// Step 4 trait.
    pub trait_: String,
    /// Step 5.
    pub archetype: String,
    /// Step 5 prose.
    pub archetype_description: String,
    /// Step 6.
    pub nature: String,
    /// Step 6 prose.
    pub nature_description: String,
    /// Step 7.
    pub education: String,
    /// Step 7 prose.
    pub education_description: String,
    /// Step 8, phrased to follow "when you".
    pub war_story: String,
    /// Step 9 checklist of choices left to the player.
    pub finishing_touches: String,
}

impl Background {
    /// The nine narrative fields produced by steps 1 through 8, in step order.
    pub fn narrative_fields(&self) -> [(&'static str, String); 9] {
        [
            ("homeland", self.homeland.clone()),
            ("aspects", self.aspects.join(", ")),
            ("caste", self.caste.clone()),
            ("caste story", self.caste_story.clone()),
            ("trait", self.trait_.clone()),
            ("archetype", self.archetype.clone()),
            ("nature", self.nature.clone()),
            ("education", self.education.clone()),
            ("war story", self.war_story.clone()),
        ]
    }
}

/// Numbers derived from attributes and skills after the life path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DerivedStats {
    /// Brawn + Resistance expertise.
    pub vigor: u32,
    /// Willpower + Discipline expertise.
    pub resolve: u32,
    /// Personality + Society expertise.
    pub gold: u32,
    /// Bonus damage from Brawn.
    pub bonus_melee: u32,
    /// Bonus damage from Awareness.
    pub bonus_ranged: u32,
    /// Bonus damage from Personality.
    pub bonus_presence: u32,
}

/// What an XP purchase bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PurchaseKind {
    /// A new talent.
    Talent(String),
    /// One experience rank.
    SkillExp(Skill),
    /// One focus rank.
    SkillFoc(Skill),
    /// One attribute point.
    Attribute(Attribute),
}

/// One XP purchase, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Purchase {
    /// What was bought.
    pub kind: PurchaseKind,
    /// XP spent.
    pub cost: u32,
}

impl std::fmt::Display for Purchase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            PurchaseKind::Talent(name) => {
                write!(f, "Spent {} xp to purchase the talent {name}", self.cost)
            }
            PurchaseKind::SkillExp(skill) => write!(
                f,
                "Spent {} xp to raise exp in the {skill} skill by 1 point",
                self.cost
            ),
            PurchaseKind::SkillFoc(skill) => write!(
                f,
                "Spent {} xp to raise foc in the {skill} skill by 1 point",
                self.cost
            ),
            PurchaseKind::Attribute(attr) => write!(
                f,
                "Spent {} xp to raise the value of the {attr} attribute by 1 point",
                self.cost
            ),
        }
    }
}

/// The evolving character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterState {
    /// Character name; empty until the player names them.
    pub name: String,
    /// Chosen gender.
    pub gender: Option<Gender>,
    /// Age in years.
    pub age: u32,
    /// Height, e.g. `5'7"`.
    pub height: String,
    /// Narrative results of the steps.
    pub background: Background,
    /// Attribute scores; always holds all seven.
    pub attributes: BTreeMap<Attribute, u32>,
    /// Skill ranks.
    pub skills: SkillBook,
    /// Held talents.
    pub talents: Talents,
    /// Equipment lines.
    pub equipment: Vec<String>,
    /// Spoken languages, homeland language first.
    pub languages: Vec<String>,
    /// Social standing.
    pub standing: i32,
    /// The skill the archetype made the character's career.
    pub career_skill: Option<Skill>,
    /// Derived numbers.
    pub derived: DerivedStats,
    /// Remaining XP budget.
    pub xp: u32,
    /// XP purchases made.
    pub purchases: Vec<Purchase>,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterState {
    /// A blank character: all attributes at the base score.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            gender: None,
            age: 0,
            height: String::new(),
            background: Background::default(),
            attributes: Attribute::ALL
                .into_iter()
                .map(|a| (a, BASE_ATTRIBUTE))
                .collect(),
            skills: SkillBook::new(),
            talents: Talents::new(),
            equipment: Vec::new(),
            languages: Vec::new(),
            standing: 0,
            career_skill: None,
            derived: DerivedStats::default(),
            xp: 0,
            purchases: Vec::new(),
        }
    }

    /// Score of an attribute.
    pub fn attribute(&self, attribute: Attribute) -> u32 {
        self.attributes
            .get(&attribute)
            .copied()
            .unwrap_or(BASE_ATTRIBUTE)
    }

    /// Add to an attribute score.
    pub fn raise_attribute(&mut self, attribute: Attribute, amount: u32) {
        *self.attributes.entry(attribute).or_insert(BASE_ATTRIBUTE) += amount;
    }

    /// Credit experience and focus ranks to a skill.
    pub fn add_skill(&mut self, skill: Skill, exp: u32, foc: u32) {
        self.skills.add(skill, exp, foc);
    }

    /// Ranks in a skill.
    pub fn skill(&self, skill: Skill) -> SkillRanks {
        self.skills.get(skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_character_has_all_attributes_at_base() {
        let c = CharacterState::new();
        assert_eq!(c.attributes.len(), 7);
        for a in Attribute::ALL {
            assert_eq!(c.attribute(a), BASE_ATTRIBUTE);
        }
    }

    #[test]
    fn unrecorded_skill_reads_zero() {
        let c = CharacterState::new();
        assert_eq!(c.skill(Skill::Sorcery), SkillRanks::default());
        assert!(!c.skills.contains(Skill::Sorcery));
    }

    #[test]
    fn add_skill_twice_doubles() {
        let mut c = CharacterState::new();
        c.add_skill(Skill::Melee, 1, 2);
        c.add_skill(Skill::Melee, 1, 2);
        assert_eq!(c.skill(Skill::Melee), SkillRanks { exp: 2, foc: 4 });
    }

    #[test]
    fn talents_are_unique_by_normalized_name() {
        let mut t = Talents::new();
        assert!(t.grant("Steely Glare", "page 12"));
        assert!(!t.grant("steely-glare", "again"));
        assert_eq!(t.len(), 1);
        assert!(t.has("STEELY GLARE"));
        assert_eq!(t.iter().next().unwrap().text, "page 12");
    }

    #[test]
    fn talents_keep_grant_order() {
        let mut t = Talents::new();
        t.grant("Zealous", "");
        t.grant("Alert", "");
        let names: Vec<_> = t.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Zealous", "Alert"]);
    }

    #[test]
    fn purchase_display() {
        let p = Purchase {
            kind: PurchaseKind::SkillFoc(Skill::Lore),
            cost: 400,
        };
        assert_eq!(
            p.to_string(),
            "Spent 400 xp to raise foc in the Lore skill by 1 point"
        );
    }

    proptest! {
        #[test]
        fn add_skill_is_additive(
            credits in proptest::collection::vec((0u32..4, 0u32..4), 0..20),
        ) {
            let mut once = CharacterState::new();
            for (exp, foc) in &credits {
                once.add_skill(Skill::Craft, *exp, *foc);
            }
            let mut twice = once.clone();
            for (exp, foc) in &credits {
                twice.add_skill(Skill::Craft, *exp, *foc);
            }
            let exp: u32 = credits.iter().map(|c| c.0).sum();
            let foc: u32 = credits.iter().map(|c| c.1).sum();
            prop_assert_eq!(once.skill(Skill::Craft), SkillRanks { exp, foc });
            prop_assert_eq!(twice.skill(Skill::Craft), SkillRanks { exp: 2 * exp, foc: 2 * foc });
        }
    }
}
