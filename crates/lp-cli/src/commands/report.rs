use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use lp_core::CharacterState;

/// Print the backstory, stat tables and XP purchases to stdout.
pub fn print_character(character: &CharacterState) {
    let b = &character.background;

    println!();
    println!("  {}", "Life Path".bold().underline());
    for (label, value) in b.narrative_fields() {
        println!("  {:<12} {value}", format!("{label}:").dimmed());
    }

    println!();
    println!("  {}", "Backstory".bold().underline());
    for line in character.narrative().lines() {
        println!("  {line}");
    }

    println!();
    println!("  {}", "Attributes".bold().underline());
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Attribute", "Score"]);
    for (attribute, score) in &character.attributes {
        table.add_row(vec![attribute.to_string(), score.to_string()]);
    }
    println!("{table}");

    println!();
    println!("  {}", "Skills".bold().underline());
    if character.skills.is_empty() {
        println!("  {}", "(none)".dimmed());
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Skill", "Attribute", "Expertise", "Focus"]);
        for (skill, ranks) in character.skills.iter() {
            let marker = if character.career_skill == Some(skill) {
                format!("{skill} (career)")
            } else {
                skill.to_string()
            };
            table.add_row(vec![
                marker,
                skill.attribute().to_string(),
                ranks.exp.to_string(),
                ranks.foc.to_string(),
            ]);
        }
        println!("{table}");
    }

    println!();
    println!("  {}", "Derived".bold().underline());
    let d = &character.derived;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Vigor", "Resolve", "Gold", "Melee", "Ranged", "Presence", "Standing",
    ]);
    table.add_row(vec![
        d.vigor.to_string(),
        d.resolve.to_string(),
        d.gold.to_string(),
        format!("+{}", d.bonus_melee),
        format!("+{}", d.bonus_ranged),
        format!("+{}", d.bonus_presence),
        character.standing.to_string(),
    ]);
    println!("{table}");

    let gender = character
        .gender
        .map_or_else(|| "unknown".to_string(), |g| g.to_string());
    println!(
        "  {} {gender}   {} {}   {} {}",
        "Gender:".dimmed(),
        "Height:".dimmed(),
        character.height,
        "Age:".dimmed(),
        character.age
    );

    if !character.purchases.is_empty() {
        println!();
        println!("  {}", "Experience".bold().underline());
        for purchase in &character.purchases {
            println!("  {purchase}");
        }
        println!(
            "  {} {} xp",
            "Unspent:".yellow().bold(),
            character.xp
        );
    }
}
