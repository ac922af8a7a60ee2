//! Talent eligibility and pricing.
//!
//! Pure functions over a talent definition and the character's current
//! talents and skills. Nothing here mutates the character.

use serde::{Deserialize, Serialize};

use lp_core::{Prerequisite, Skill, SkillBook, TalentDefinition, Talents};

/// XP per talent tier.
pub const TIER_COST: i64 = 200;

/// XP discount per focus rank in the talent's governing skill.
pub const FOCUS_DISCOUNT: i64 = 25;

/// How an "A or B" prerequisite is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrSemantics {
    /// Every listed talent must be held.
    #[default]
    Literal,
    /// Holding any one listed talent is enough.
    AnyOf,
}

/// Returns true if one prerequisite clause holds.
pub fn prerequisite_met(
    prerequisite: &Prerequisite,
    talents: &Talents,
    skills: &SkillBook,
    semantics: OrSemantics,
) -> bool {
    match prerequisite {
        Prerequisite::Talent(name) => talents.has(name),
        Prerequisite::AnyTalent(names) => match semantics {
            OrSemantics::Literal => names.iter().all(|n| talents.has(n)),
            OrSemantics::AnyOf => names.iter().any(|n| talents.has(n)),
        },
        Prerequisite::SkillRank {
            skill,
            expertise,
            focus,
        } => {
            let ranks = skills.get(*skill);
            ranks.exp >= *expertise && ranks.foc >= *focus
        }
    }
}

/// Returns true if the talent is not yet held and every prerequisite holds.
pub fn is_allowed(
    def: &TalentDefinition,
    talents: &Talents,
    skills: &SkillBook,
    semantics: OrSemantics,
) -> bool {
    !talents.has(&def.name)
        && def
            .prerequisites
            .iter()
            .all(|p| prerequisite_met(p, talents, skills, semantics))
}

/// `tier * 200 - focus * 25`, before clamping. Negative for cheap talents
/// in a heavily focused skill.
pub fn raw_cost(def: &TalentDefinition, skills: &SkillBook) -> i64 {
    let focus = i64::from(skills.get(def.skill).foc);
    i64::from(def.tier) * TIER_COST - focus * FOCUS_DISCOUNT
}

/// What buying the talent actually costs: the raw cost, never below zero.
pub fn purchase_cost(def: &TalentDefinition, skills: &SkillBook) -> u32 {
    u32::try_from(raw_cost(def, skills).max(0)).unwrap_or(u32::MAX)
}

/// Returns true if the talent's governing skill is in `skills`.
pub fn matches_skills(def: &TalentDefinition, skills: &[Skill]) -> bool {
    skills.contains(&def.skill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn def(json: &str) -> TalentDefinition {
        serde_json::from_str(json).unwrap()
    }

    fn warlord() -> TalentDefinition {
        def(r#"{"name": "Warlord", "skill": "Command", "prerequisites": "Born Leader or Tactician, Command focus 2", "tier": 3}"#)
    }

    #[test]
    fn no_prerequisites_is_allowed_until_owned() {
        let d = def(r#"{"name": "Alert", "skill": "Observation", "prerequisites": "None"}"#);
        let mut talents = Talents::new();
        let skills = SkillBook::new();
        assert!(is_allowed(&d, &talents, &skills, OrSemantics::Literal));
        talents.grant("ALERT", "");
        assert!(!is_allowed(&d, &talents, &skills, OrSemantics::Literal));
    }

    #[test]
    fn talent_prerequisite_uses_normalized_names() {
        let d = def(r#"{"name": "Hard Target", "skill": "Resistance", "prerequisites": "Iron Hide"}"#);
        let mut talents = Talents::new();
        let skills = SkillBook::new();
        assert!(!is_allowed(&d, &talents, &skills, OrSemantics::Literal));
        talents.grant("iron-hide", "");
        assert!(is_allowed(&d, &talents, &skills, OrSemantics::Literal));
    }

    #[test]
    fn skill_thresholds_checked_independently() {
        let d = def(r#"{"name": "Whirlwind", "skill": "Melee", "prerequisites": "Melee focus 2, Melee expertise 1"}"#);
        let talents = Talents::new();
        let mut skills = SkillBook::new();
        skills.add(Skill::Melee, 3, 1);
        assert!(!is_allowed(&d, &talents, &skills, OrSemantics::Literal));
        skills.add(Skill::Melee, 0, 1);
        assert!(is_allowed(&d, &talents, &skills, OrSemantics::Literal));
    }

    #[test]
    fn or_clause_literal_versus_any_of() {
        let d = warlord();
        let mut talents = Talents::new();
        let mut skills = SkillBook::new();
        skills.add(Skill::Command, 0, 2);
        talents.grant("Born Leader", "");

        assert!(!is_allowed(&d, &talents, &skills, OrSemantics::Literal));
        assert!(is_allowed(&d, &talents, &skills, OrSemantics::AnyOf));

        talents.grant("Tactician", "");
        assert!(is_allowed(&d, &talents, &skills, OrSemantics::Literal));
    }

    #[test]
    fn cost_is_discounted_by_focus() {
        let d = warlord();
        let mut skills = SkillBook::new();
        assert_eq!(raw_cost(&d, &skills), 600);
        skills.add(Skill::Command, 0, 4);
        assert_eq!(raw_cost(&d, &skills), 500);
        assert_eq!(purchase_cost(&d, &skills), 500);
    }

    #[test]
    fn raw_cost_can_go_negative_but_purchase_cost_cannot() {
        let d = def(r#"{"name": "Alert", "skill": "Observation"}"#);
        let mut skills = SkillBook::new();
        skills.add(Skill::Observation, 0, 10);
        assert_eq!(raw_cost(&d, &skills), -50);
        assert_eq!(purchase_cost(&d, &skills), 0);
    }

    #[test]
    fn matches_governing_skill() {
        let d = warlord();
        assert!(matches_skills(&d, &[Skill::Lore, Skill::Command]));
        assert!(!matches_skills(&d, &[Skill::Lore]));
        assert!(!matches_skills(&d, &[]));
    }

    proptest! {
        #[test]
        fn eligibility_is_monotonic_in_ranks(
            exp in 0u32..5, foc in 0u32..5, more_exp in 0u32..3, more_foc in 0u32..3,
        ) {
            let d = def(r#"{"name": "Sage", "skill": "Lore", "prerequisites": "Lore expertise 2, Lore focus 2"}"#);
            let talents = Talents::new();
            let mut skills = SkillBook::new();
            skills.add(Skill::Lore, exp, foc);
            let before = is_allowed(&d, &talents, &skills, OrSemantics::Literal);
            skills.add(Skill::Lore, more_exp, more_foc);
            let after = is_allowed(&d, &talents, &skills, OrSemantics::Literal);
            prop_assert!(!before || after);
        }

        #[test]
        fn purchase_cost_never_exceeds_tier_price(tier in 1u32..4, foc in 0u32..20) {
            let d = TalentDefinition {
                name: "Test".into(),
                skill: Skill::Melee,
                attribute: Skill::Melee.attribute(),
                prerequisites: Vec::new(),
                max_ranks: 1,
                tier,
                description: String::new(),
            };
            let mut skills = SkillBook::new();
            skills.add(Skill::Melee, 0, foc);
            prop_assert!(i64::from(purchase_cost(&d, &skills)) <= i64::from(tier) * TIER_COST);
        }
    }
}
