//! Numbers derived once the life path is complete.

use lp_core::{Attribute, CharacterState, DerivedStats, RangeTable, Skill, TableResult};
use lp_mechanics::{RandomResult, RandomSource};

/// Bonus damage by attribute score, looked up range-floor.
const BONUS_DAMAGE: [(u32, u32); 6] = [(8, 0), (9, 1), (11, 2), (13, 3), (15, 5), (25, 6)];

/// Bonus damage dice for an attribute score.
pub fn bonus_damage(score: u32) -> TableResult<u32> {
    let table: RangeTable<u32> = BONUS_DAMAGE.into_iter().collect();
    table.lookup("bonus damage", score).copied()
}

/// Vigor, resolve, gold and the three bonus damage values.
pub fn derive_stats(character: &CharacterState) -> TableResult<DerivedStats> {
    let exp = |skill| character.skill(skill).exp;
    Ok(DerivedStats {
        vigor: character.attribute(Attribute::Brawn) + exp(Skill::Resistance),
        resolve: character.attribute(Attribute::Willpower) + exp(Skill::Discipline),
        gold: character.attribute(Attribute::Personality) + exp(Skill::Society),
        bonus_melee: bonus_damage(character.attribute(Attribute::Brawn))?,
        bonus_ranged: bonus_damage(character.attribute(Attribute::Awareness))?,
        bonus_presence: bonus_damage(character.attribute(Attribute::Personality))?,
    })
}

/// Feet of height for a roll in `0..=20`.
pub fn feet_for_roll(roll: u32) -> u32 {
    match roll {
        0..2 => 4,
        2..13 => 5,
        13..20 => 6,
        _ => 7,
    }
}

/// A height like `5'7"`.
pub fn roll_height(local: &mut dyn RandomSource) -> RandomResult<String> {
    let feet = feet_for_roll(local.draw_one(0, 20)?);
    let inches = local.draw_one(0, 11)?;
    Ok(format!("{feet}'{inches}\""))
}

/// An age between 15 and 40.
pub fn roll_age(local: &mut dyn RandomSource) -> RandomResult<u32> {
    local.draw_one(15, 40)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_mechanics::ScriptedRandom;

    #[test]
    fn bonus_breakpoints() {
        assert_eq!(bonus_damage(7).unwrap(), 0);
        assert_eq!(bonus_damage(8).unwrap(), 0);
        assert_eq!(bonus_damage(9).unwrap(), 1);
        assert_eq!(bonus_damage(10).unwrap(), 2);
        assert_eq!(bonus_damage(13).unwrap(), 3);
        assert_eq!(bonus_damage(14).unwrap(), 5);
        assert_eq!(bonus_damage(25).unwrap(), 6);
        assert!(bonus_damage(26).is_err());
    }

    #[test]
    fn stats_from_attributes_and_skills() {
        let mut c = CharacterState::new();
        c.raise_attribute(Attribute::Brawn, 6);
        c.add_skill(Skill::Resistance, 2, 0);
        c.add_skill(Skill::Society, 1, 3);
        let d = derive_stats(&c).unwrap();
        assert_eq!(d.vigor, 15);
        assert_eq!(d.resolve, 7);
        assert_eq!(d.gold, 8);
        assert_eq!(d.bonus_melee, 3);
        assert_eq!(d.bonus_ranged, 0);
    }

    #[test]
    fn height_buckets() {
        assert_eq!(feet_for_roll(0), 4);
        assert_eq!(feet_for_roll(1), 4);
        assert_eq!(feet_for_roll(2), 5);
        assert_eq!(feet_for_roll(12), 5);
        assert_eq!(feet_for_roll(13), 6);
        assert_eq!(feet_for_roll(19), 6);
        assert_eq!(feet_for_roll(20), 7);
    }

    #[test]
    fn height_and_age_from_source() {
        let mut local = ScriptedRandom::new([15, 11, 40]);
        assert_eq!(roll_height(&mut local).unwrap(), "6'11\"");
        assert_eq!(roll_age(&mut local).unwrap(), 40);
    }
}
