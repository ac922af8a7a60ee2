//! Applying the grants of an archetype, nature or education row.
//!
//! Parts are applied in a fixed order: career talent, career skill,
//! mandatory skills, elective skills, talent choice, equipment, attribute
//! improvement.

use lp_core::{CharacterState, GrantFields, Skill, SkillRef, TableError, TableStore};
use lp_mechanics::{OrSemantics, RandomSource, is_allowed, matches_skills};

use crate::error::LifePathResult;
use crate::select::{Chooser, choose_index};

/// How deep a random career skill may nest. The nested grant itself never
/// rolls again.
const MAX_DEPTH: u8 = 1;

/// Everything a step needs besides the character itself.
pub struct StepContext<'a> {
    /// Content tables.
    pub tables: &'a TableStore,
    /// Life-path dice; also rolls the extra archetype for a random career
    /// skill.
    pub dice: &'a mut dyn RandomSource,
    /// Local generator for height, age and XP spending.
    pub local: &'a mut dyn RandomSource,
    /// Makes the player's decisions.
    pub chooser: &'a mut dyn Chooser,
    /// How OR prerequisites are read.
    pub semantics: OrSemantics,
}

/// The outcome of a roll on the archetype table for a random career skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomCareerSkill {
    /// Archetype the roll landed on.
    pub archetype: String,
    /// That archetype's career skill.
    pub skill: Skill,
}

/// Apply every part of `grants` to the character. `origin` names the row
/// in messages, e.g. "Your barbarian archetype".
pub fn apply_grants(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    grants: &GrantFields,
    origin: &str,
) -> LifePathResult<()> {
    apply_at_depth(ctx, character, grants, origin, 0)
}

fn apply_at_depth(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    grants: &GrantFields,
    origin: &str,
    depth: u8,
) -> LifePathResult<()> {
    let mut rolled_career_skill = None;

    if let Some(talent) = &grants.career_talent {
        let granted = character.talents.grant(&talent.name, &talent.page);
        tracing::debug!(talent = %talent.name, granted, origin, "career talent");
    }

    if let Some(skill) = grants.career_skill {
        character.add_skill(skill, 2, 2);
        character.career_skill = Some(skill);
        tracing::debug!(%skill, origin, "credited career skill +2/+2");
    }

    let mut talent_skills = Vec::new();
    for skill_ref in &grants.mandatory_skills {
        let credited = credit_skill(ctx, character, *skill_ref, depth)?;
        if *skill_ref == SkillRef::RandomCareerSkill {
            rolled_career_skill = rolled_career_skill.or(credited);
        }
        talent_skills.extend(credited);
    }

    if !grants.elective_skills.is_empty() {
        let list: Vec<String> = grants.elective_skills.iter().map(ToString::to_string).collect();
        ctx.chooser.notify(&format!(
            "Select 2 elective skills to each get +1EXP/+1FOC. {origin} grants you the following elective skills:\n{}",
            list.join(", ")
        ))?;
        let mut pool = grants.elective_skills.clone();
        for order in ["first", "second"] {
            if pool.is_empty() {
                break;
            }
            let labels: Vec<String> = pool.iter().map(ToString::to_string).collect();
            let index = choose_index(
                &mut *ctx.chooser,
                &format!("Select the {order} skill to get +1EXP/+1FOC:"),
                &labels,
            )?;
            let picked = pool.remove(index);
            let credited = credit_skill(ctx, character, picked, depth)?;
            if picked == SkillRef::RandomCareerSkill {
                rolled_career_skill = rolled_career_skill.or(credited);
            }
        }
        for skill_ref in &grants.elective_skills {
            talent_skills.extend(match skill_ref {
                SkillRef::Named(skill) => Some(*skill),
                SkillRef::CareerSkill => character.career_skill,
                SkillRef::RandomCareerSkill => rolled_career_skill,
            });
        }
    }

    if grants.talent_choice {
        choose_talent(ctx, character, &talent_skills)?;
    }

    if !grants.equipment.is_empty() {
        character.equipment.extend(grants.equipment.iter().cloned());
    }

    if let Some(attribute) = grants.attribute_improvement {
        character.raise_attribute(attribute, 1);
        tracing::debug!(%attribute, origin, "attribute improved by 1");
    }
    Ok(())
}

/// Credit +1/+1 to the skill a reference resolves to. A random career skill
/// instead rolls an archetype and applies its career skill as a nested
/// grant. Returns the skill that was credited, if any.
pub fn credit_skill(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    skill_ref: SkillRef,
    depth: u8,
) -> LifePathResult<Option<Skill>> {
    match skill_ref {
        SkillRef::Named(skill) => {
            character.add_skill(skill, 1, 1);
            Ok(Some(skill))
        }
        SkillRef::CareerSkill => match character.career_skill {
            Some(skill) => {
                tracing::debug!(%skill, "boosting career skill");
                character.add_skill(skill, 1, 1);
                Ok(Some(skill))
            }
            None => {
                tracing::warn!("no career skill to boost");
                Ok(None)
            }
        },
        SkillRef::RandomCareerSkill if depth >= MAX_DEPTH => {
            tracing::warn!("random career skill inside a nested grant ignored");
            Ok(None)
        }
        SkillRef::RandomCareerSkill => {
            let rolled = roll_random_career_skill(ctx)?;
            let origin = format!("Your additional random ({}) archetype", rolled.archetype);
            apply_at_depth(
                ctx,
                character,
                &GrantFields::career_skill_only(rolled.skill),
                &origin,
                depth + 1,
            )?;
            Ok(Some(rolled.skill))
        }
    }
}

/// Roll one d20 on the archetype table and return that archetype's career
/// skill.
pub fn roll_random_career_skill(ctx: &mut StepContext<'_>) -> LifePathResult<RandomCareerSkill> {
    let roll = ctx.dice.draw_one(1, 20)?;
    let archetype = ctx.tables.archetype(roll)?;
    let skill = ctx
        .tables
        .archetype_details(archetype)?
        .grants
        .career_skill
        .ok_or_else(|| TableError::MissingKey {
            table: "archetype career skills",
            key: archetype.to_string(),
        })?;
    tracing::debug!(roll, archetype, %skill, "rolled random career skill");
    Ok(RandomCareerSkill {
        archetype: archetype.to_string(),
        skill,
    })
}

fn choose_talent(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    skills: &[Skill],
) -> LifePathResult<()> {
    let tables = ctx.tables;
    let choices: Vec<_> = tables
        .talents()
        .filter(|def| {
            is_allowed(def, &character.talents, &character.skills, ctx.semantics)
                && matches_skills(def, skills)
        })
        .collect();
    if choices.is_empty() {
        ctx.chooser
            .notify("No talent is available for the skills above; skipping the talent choice.")?;
        tracing::warn!(?skills, "no eligible talent");
        return Ok(());
    }
    let names: Vec<String> = choices.iter().map(|def| def.name.clone()).collect();
    let index = choose_index(
        &mut *ctx.chooser,
        &format!(
            "Choose any one talent associated with one of the following skills:\n{}",
            names.join(", ")
        ),
        &names,
    )?;
    let def = choices[index];
    character.talents.grant(&def.name, &def.description);
    tracing::debug!(talent = %def.name, "granted chosen talent");
    Ok(())
}
