//! Spending an experience budget at random.
//!
//! Each round lists what is affordable, picks a category uniformly among the
//! non-empty ones, then an option uniformly within it. The loop stops when
//! nothing is affordable.

use lp_core::{Attribute, CharacterState, Purchase, PurchaseKind, TableStore};
use lp_mechanics::{OrSemantics, RandomSource, is_allowed, purchase_cost};

use crate::error::LifePathResult;

/// XP per attribute point above the current score.
pub const ATTRIBUTE_COST: u32 = 100;

/// XP per skill rank above the current one.
pub const SKILL_RANK_COST: u32 = 200;

/// Price of raising an attribute currently at `score`.
pub fn attribute_cost(score: u32) -> u32 {
    ATTRIBUTE_COST * (score + 1)
}

/// Price of raising a skill dimension currently at `rank`.
pub fn skill_rank_cost(rank: u32) -> u32 {
    SKILL_RANK_COST * (rank + 1)
}

/// Everything the character can currently afford, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affordable {
    /// Allowed talents.
    pub talents: Vec<Purchase>,
    /// Next experience rank in a recorded skill.
    pub skill_exp: Vec<Purchase>,
    /// Next focus rank in a recorded skill.
    pub skill_foc: Vec<Purchase>,
    /// Next point in an attribute.
    pub attributes: Vec<Purchase>,
}

impl Affordable {
    /// The non-empty categories.
    pub fn categories(&self) -> Vec<&[Purchase]> {
        [
            &self.talents,
            &self.skill_exp,
            &self.skill_foc,
            &self.attributes,
        ]
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(Vec::as_slice)
        .collect()
    }

    /// Returns true if nothing is affordable.
    pub fn is_empty(&self) -> bool {
        self.categories().is_empty()
    }
}

/// List every purchase the character's remaining XP covers.
pub fn affordable_purchases(
    tables: &TableStore,
    character: &CharacterState,
    semantics: OrSemantics,
) -> Affordable {
    let xp = character.xp;
    let within_budget = |p: &Purchase| p.cost <= xp;

    let talents = tables
        .talents()
        .filter(|def| is_allowed(def, &character.talents, &character.skills, semantics))
        .map(|def| Purchase {
            kind: PurchaseKind::Talent(def.name.clone()),
            cost: purchase_cost(def, &character.skills),
        })
        .filter(within_budget)
        .collect();

    let skill_exp = character
        .skills
        .iter()
        .map(|(skill, ranks)| Purchase {
            kind: PurchaseKind::SkillExp(skill),
            cost: skill_rank_cost(ranks.exp),
        })
        .filter(within_budget)
        .collect();

    let skill_foc = character
        .skills
        .iter()
        .map(|(skill, ranks)| Purchase {
            kind: PurchaseKind::SkillFoc(skill),
            cost: skill_rank_cost(ranks.foc),
        })
        .filter(within_budget)
        .collect();

    let attributes = Attribute::ALL
        .into_iter()
        .map(|attribute| Purchase {
            kind: PurchaseKind::Attribute(attribute),
            cost: attribute_cost(character.attribute(attribute)),
        })
        .filter(within_budget)
        .collect();

    Affordable {
        talents,
        skill_exp,
        skill_foc,
        attributes,
    }
}

/// Apply a purchase and deduct its cost.
pub fn apply_purchase(tables: &TableStore, character: &mut CharacterState, purchase: Purchase) {
    match &purchase.kind {
        PurchaseKind::Talent(name) => {
            let text = tables.talent(name).map_or("", |def| def.description.as_str());
            character.talents.grant(name, text);
        }
        PurchaseKind::SkillExp(skill) => character.add_skill(*skill, 1, 0),
        PurchaseKind::SkillFoc(skill) => character.add_skill(*skill, 0, 1),
        PurchaseKind::Attribute(attribute) => character.raise_attribute(*attribute, 1),
    }
    character.xp = character.xp.saturating_sub(purchase.cost);
    tracing::info!("{purchase}");
    character.purchases.push(purchase);
}

/// Spend the character's XP until nothing more is affordable.
pub fn spend_xp(
    tables: &TableStore,
    character: &mut CharacterState,
    local: &mut dyn RandomSource,
    semantics: OrSemantics,
) -> LifePathResult<()> {
    loop {
        let affordable = affordable_purchases(tables, character, semantics);
        let categories = affordable.categories();
        if categories.is_empty() {
            break;
        }
        let category = categories[local.choose_index(categories.len())?];
        let purchase = category[local.choose_index(category.len())?].clone();
        apply_purchase(tables, character, purchase);
    }
    tracing::debug!(remaining = character.xp, "xp spending finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::Skill;
    use lp_mechanics::PseudoRandom;
    use proptest::prelude::*;

    fn tables() -> TableStore {
        TableStore::bundled().unwrap()
    }

    #[test]
    fn costs() {
        assert_eq!(attribute_cost(7), 800);
        assert_eq!(skill_rank_cost(0), 200);
        assert_eq!(skill_rank_cost(2), 600);
    }

    #[test]
    fn nothing_affordable_without_xp() {
        let t = tables();
        let mut c = CharacterState::new();
        c.add_skill(Skill::Melee, 1, 1);
        assert!(affordable_purchases(&t, &c, OrSemantics::Literal).is_empty());
    }

    #[test]
    fn budget_filters_categories() {
        let t = tables();
        let mut c = CharacterState::new();
        c.add_skill(Skill::Melee, 1, 0);
        c.xp = 300;
        let a = affordable_purchases(&t, &c, OrSemantics::Literal);
        // Tier-1 talents cost 200; Melee exp costs 400, foc 200; attributes 800.
        assert!(!a.talents.is_empty());
        assert!(a.talents.iter().all(|p| p.cost <= 300));
        assert!(a.skill_exp.is_empty());
        assert_eq!(
            a.skill_foc,
            vec![Purchase {
                kind: PurchaseKind::SkillFoc(Skill::Melee),
                cost: 200
            }]
        );
        assert!(a.attributes.is_empty());
        assert_eq!(a.categories().len(), 2);
    }

    #[test]
    fn apply_records_and_deducts() {
        let t = tables();
        let mut c = CharacterState::new();
        c.xp = 1000;
        apply_purchase(
            &t,
            &mut c,
            Purchase {
                kind: PurchaseKind::Attribute(Attribute::Brawn),
                cost: 800,
            },
        );
        assert_eq!(c.attribute(Attribute::Brawn), 8);
        assert_eq!(c.xp, 200);
        assert_eq!(
            c.purchases[0].to_string(),
            "Spent 800 xp to raise the value of the Brawn attribute by 1 point"
        );
    }

    #[test]
    fn purchased_talent_gets_its_description() {
        let t = tables();
        let mut c = CharacterState::new();
        c.xp = 200;
        apply_purchase(
            &t,
            &mut c,
            Purchase {
                kind: PurchaseKind::Talent("Alert".into()),
                cost: 200,
            },
        );
        let owned = c.talents.iter().next().unwrap();
        assert_eq!(owned.name, "Alert");
        assert!(owned.text.contains("never surprised"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn spending_terminates_and_accounts_for_every_point(seed in any::<u64>(), xp in 0u32..4000) {
            let t = tables();
            let mut c = CharacterState::new();
            c.add_skill(Skill::Melee, 1, 1);
            c.add_skill(Skill::Lore, 0, 2);
            c.xp = xp;
            let mut local = PseudoRandom::seeded(seed);
            spend_xp(&t, &mut c, &mut local, OrSemantics::Literal).unwrap();

            let spent: u32 = c.purchases.iter().map(|p| p.cost).sum();
            prop_assert_eq!(spent + c.xp, xp);
            prop_assert!(affordable_purchases(&t, &c, OrSemantics::Literal).is_empty());
        }
    }
}
