//! The nine life-path steps.
//!
//! Fourteen d20s are rolled up front and popped last-rolled-first: two for
//! the homeland, two for attributes, one each for caste, caste story,
//! archetype, nature, education and war story, and four for the finishing
//! touches. Every step takes the character explicitly and only adds to it.

use lp_core::narrative::with_article;
use lp_core::{Attribute, CharacterState, Gender, TableStore};
use lp_mechanics::{DiceBatch, DiceExpr, Die, RandomSource};

use crate::config::GeneratorConfig;
use crate::derived::{derive_stats, roll_age, roll_height};
use crate::error::{LifePathResult, SelectionError};
use crate::grant::{StepContext, apply_grants, credit_skill};
use crate::select::{Chooser, choose_index, choose_value};
use crate::xp::spend_xp;

/// Dice rolled for one life path.
pub const LIFE_PATH_DICE: DiceExpr = DiceExpr {
    count: 14,
    die: Die::D20,
};

/// Checklist of the choices left to the player once generation is done.
pub const FINISHING_TOUCHES: &str = "Now that your character is generated, remember to complete your finishing touches.\n\
Skills:\n\
\tDistribute 3 exp/foc among your skills however you desire.\n\
Talent:\n\
\tChoose one additional talent provided you meet the prerequisites (Also check above for talent choices from character creation)\n\
Language:\n\
\tPick an extra language, plus one additional extra language for each point of foc in Linguistics\n";

/// Run the whole life path, derive the finished numbers and spend the XP
/// budget.
pub fn generate(
    tables: &TableStore,
    dice: &mut dyn RandomSource,
    local: &mut dyn RandomSource,
    chooser: &mut dyn Chooser,
    config: &GeneratorConfig,
) -> LifePathResult<CharacterState> {
    let mut ctx = StepContext {
        tables,
        dice,
        local,
        chooser,
        semantics: config.or_semantics,
    };
    let mut character = CharacterState::new();
    let mut batch = DiceBatch::roll(LIFE_PATH_DICE, &mut *ctx.dice)?;

    step_homeland(&mut ctx, &mut character, batch.pop_sum(2)?)?;
    step_attributes(&mut ctx, &mut character, [batch.pop()?, batch.pop()?])?;
    step_caste(&mut ctx, &mut character, batch.pop()?)?;
    step_caste_story(&mut ctx, &mut character, batch.pop()?)?;
    step_archetype(&mut ctx, &mut character, batch.pop()?)?;
    step_nature(&mut ctx, &mut character, batch.pop()?)?;
    step_education(&mut ctx, &mut character, batch.pop()?)?;
    step_war_story(&mut ctx, &mut character, batch.pop()?)?;
    step_finishing_touches(
        &mut ctx,
        &mut character,
        [batch.pop()?, batch.pop()?, batch.pop()?, batch.pop()?],
    )?;
    finish(&mut ctx, &mut character)?;

    if config.xp > 0 {
        character.xp = config.xp;
        spend_xp(ctx.tables, &mut character, &mut *ctx.local, ctx.semantics)?;
    }
    tracing::info!(
        homeland = %character.background.homeland,
        archetype = %character.background.archetype,
        "character generated"
    );
    Ok(character)
}

/// Step 1: homeland, its talent and its language.
pub fn step_homeland(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    roll: u32,
) -> LifePathResult<()> {
    let row = ctx.tables.homeland(roll)?;
    character.background.homeland = row.name.clone();
    let text = ctx.tables.homeland_talent(&row.talent).unwrap_or_default();
    character.talents.grant(&row.talent, text);
    character.languages.push(row.language.clone());
    tracing::debug!(roll, homeland = %row.name, "step 1: homeland");
    Ok(())
}

/// Step 2: two attribute rows. The four mandatory attributes get +3 for the
/// best, +1 for the worst and +2 for the rest; each row adds +1 to one of
/// its optional attributes.
pub fn step_attributes(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    rolls: [u32; 2],
) -> LifePathResult<()> {
    let rows = [
        ctx.tables.attribute_row(rolls[0])?,
        ctx.tables.attribute_row(rolls[1])?,
    ];
    for row in &rows {
        if !character.background.aspects.contains(&row.aspect) {
            character.background.aspects.push(row.aspect.clone());
        }
    }

    let mut candidates: Vec<Attribute> = rows.iter().flat_map(|row| row.mandatory).collect();
    let names: Vec<String> = candidates.iter().map(ToString::to_string).collect();
    ctx.chooser.notify(&format!(
        "Because your character is {}, your mandatory attributes are:\n{}",
        character.background.aspects.join(" and "),
        names.join(", ")
    ))?;

    let best_index = pick_index(
        ctx.chooser,
        "Select your \"best\" mandatory attribute (+3 to attribute):",
        &candidates,
    )?;
    let best = candidates.remove(best_index);
    if candidates.iter().all(|a| *a == best) {
        return Err(SelectionError::NoOptions.into());
    }
    let worst = loop {
        let index = pick_index(
            ctx.chooser,
            "Select your \"worst\" mandatory attribute (+1 to attribute):",
            &candidates,
        )?;
        if candidates[index] != best {
            break candidates.remove(index);
        }
        ctx.chooser
            .notify("You cannot select the same attribute as best and worst")?;
    };

    character.raise_attribute(best, 3);
    character.raise_attribute(worst, 1);
    for other in candidates {
        character.raise_attribute(other, 2);
    }

    for row in &rows {
        let [a, b] = row.optional;
        let choice = choose_value(
            ctx.chooser,
            &format!("Select either {a} or {b} to get another +1:"),
            &row.optional,
        )?;
        character.raise_attribute(choice, 1);
    }
    tracing::debug!(?rolls, %best, %worst, "step 2: attributes");
    Ok(())
}

fn pick_index(
    chooser: &mut dyn Chooser,
    prompt: &str,
    candidates: &[Attribute],
) -> LifePathResult<usize> {
    let labels: Vec<String> = candidates.iter().map(ToString::to_string).collect();
    Ok(choose_index(chooser, prompt, &labels)?)
}

/// Step 3: caste, its talents, skill and standing.
pub fn step_caste(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    roll: u32,
) -> LifePathResult<()> {
    let row = ctx.tables.caste(roll)?;
    character.background.caste = row.name.clone();
    character.background.caste_description = ctx
        .tables
        .caste_description(&row.name)
        .unwrap_or_default()
        .to_string();
    for talent in &row.talents {
        let text = ctx.tables.caste_talent(talent).unwrap_or_default();
        character.talents.grant(talent, text);
    }
    character.add_skill(row.skill, 1, 1);
    character.standing += row.standing;
    tracing::debug!(roll, caste = %row.name, "step 3: caste");
    Ok(())
}

/// Step 4: the story behind the caste.
pub fn step_caste_story(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    roll: u32,
) -> LifePathResult<()> {
    let caste = character.background.caste.clone();
    let row = ctx.tables.caste_story(&caste, roll)?;
    let background = &mut character.background;
    background.caste_story = row.name.clone();
    background.trait_ = row.trait_.clone();
    background.caste_story_description = ctx
        .tables
        .caste_story_description(&caste, &row.name)
        .unwrap_or_default()
        .to_string();
    tracing::debug!(roll, story = %row.name, "step 4: caste story");
    Ok(())
}

/// Step 5: archetype.
pub fn step_archetype(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    roll: u32,
) -> LifePathResult<()> {
    let tables = ctx.tables;
    let name = tables.archetype(roll)?;
    let details = tables.archetype_details(name)?;
    character.background.archetype = name.to_string();
    character.background.archetype_description = details.description.clone();
    tracing::debug!(roll, archetype = name, "step 5: archetype");
    apply_grants(
        ctx,
        character,
        &details.grants,
        &format!("Your {} archetype", un_camel(name)),
    )
}

/// Step 6: nature.
pub fn step_nature(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    roll: u32,
) -> LifePathResult<()> {
    let tables = ctx.tables;
    let name = tables.nature(roll)?;
    let details = tables.nature_details(name)?;
    character.background.nature = name.to_string();
    character.background.nature_description = details.description.clone();
    tracing::debug!(roll, nature = name, "step 6: nature");
    apply_grants(
        ctx,
        character,
        &details.grants,
        &format!("Your {} nature", un_camel(name)),
    )
}

/// Step 7: education. The education must have a details entry.
pub fn step_education(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    roll: u32,
) -> LifePathResult<()> {
    let tables = ctx.tables;
    let name = tables.education(roll)?;
    let details = tables.education_details(name)?;
    character.background.education = name.to_string();
    character.background.education_description = details.description.clone();
    tracing::debug!(roll, education = name, "step 7: education");
    apply_grants(
        ctx,
        character,
        &details.grants,
        &format!("Your {} education", un_camel(name)),
    )
}

/// Step 8: war story and its skill bonus.
pub fn step_war_story(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    roll: u32,
) -> LifePathResult<()> {
    let tables = ctx.tables;
    let row = tables.war_story(roll)?;
    character.background.war_story = war_story_phrase(&row.story);
    for skill_ref in &row.skills {
        credit_skill(ctx, character, *skill_ref, 0)?;
    }
    tracing::debug!(roll, story = %row.story, "step 8: war story");
    Ok(())
}

/// "Wounded" → "were wounded"; longer stories are only lower-cased.
pub fn war_story_phrase(story: &str) -> String {
    let story = story.trim().to_lowercase();
    if story.contains(' ') {
        story
    } else {
        format!("were {story}")
    }
}

/// Step 9: garment, belonging, and a weapon with its provenance.
pub fn step_finishing_touches(
    ctx: &mut StepContext<'_>,
    character: &mut CharacterState,
    rolls: [u32; 4],
) -> LifePathResult<()> {
    let [garment, belonging, weapon, provenance] = rolls;
    let tables = ctx.tables;
    character.equipment.push(tables.garment(garment)?.to_string());
    character
        .equipment
        .push(tables.belonging(belonging)?.to_string());
    let line = weapon_line(tables.provenance(provenance)?, tables.weapon(weapon)?);
    character.equipment.push(line);
    character.background.finishing_touches = FINISHING_TOUCHES.to_string();
    tracing::debug!(?rolls, "step 9: finishing touches");
    Ok(())
}

/// Fill a provenance template with the weapon name and format it as an
/// equipment line. A template that opens with the ellipsis gets an article.
pub fn weapon_line(provenance: &str, weapon: &str) -> String {
    let padded = format!(" {weapon} ");
    let filled = provenance.replace("...", &padded).replace('…', &padded);
    let leading_space = filled.starts_with(' ');
    let filled = filled
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" , ", ", ")
        .replace(" ,", ",");
    let filled = if leading_space {
        with_article(&filled)
    } else {
        filled
    };
    format!("Weapon: {filled} (see Chapter 4 of player guide for stats)")
}

/// Derived stats, height, gender and age.
fn finish(ctx: &mut StepContext<'_>, character: &mut CharacterState) -> LifePathResult<()> {
    character.derived = derive_stats(character)?;
    character.height = roll_height(&mut *ctx.local)?;
    character.gender = Some(choose_value(
        ctx.chooser,
        "Select your character's gender:",
        &Gender::ALL,
    )?);
    character.age = roll_age(&mut *ctx.local)?;
    Ok(())
}

/// "WarPriest" → "war priest".
fn un_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 && !out.ends_with(' ') {
            out.push(' ');
        }
        out.extend(c.to_lowercase());
    }
    out
}
