use std::fmt::Write;
use std::path::{Path, PathBuf};

use lp_core::{Attribute, CharacterState, DerivedStats};
use lp_mechanics::{DiceExpr, Die};

const TEMPLATE: &str = include_str!("sheet_template.xml");

/// Roll lists on the sheet, in sheet order. Brawn and Willpower share one.
const ROLL_LISTS: [(&str, &[Attribute]); 6] = [
    ("1", &[Attribute::Agility]),
    ("1a", &[Attribute::Coordination]),
    ("2", &[Attribute::Awareness]),
    ("2a", &[Attribute::Intelligence]),
    ("3", &[Attribute::Brawn, Attribute::Willpower]),
    ("3a", &[Attribute::Personality]),
];

/// Write the character sheet into `out_dir` and return its path.
pub fn write_sheet(character: &CharacterState, out_dir: &Path) -> Result<PathBuf, String> {
    let path = sheet_path(out_dir, &character.name);
    std::fs::write(&path, render_sheet(character))
        .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "sheet written");
    Ok(path)
}

/// `<out_dir>/FG_import_<name without spaces>.xml`.
pub fn sheet_path(out_dir: &Path, name: &str) -> PathBuf {
    let stem: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    out_dir.join(format!("FG_import_{stem}.xml"))
}

/// Fill the sheet template from a finished character.
pub fn render_sheet(character: &CharacterState) -> String {
    let derived = &character.derived;
    let notes = character.narrative().replace('\n', "\\n");
    let gender = character.gender.map(|g| g.to_string()).unwrap_or_default();

    let fields: [(&str, String); 18] = [
        ("abilities", abilities(character)),
        ("age", character.age.to_string()),
        ("attacks", xml_escape(&attacks(derived))),
        ("bonus_melee", derived.bonus_melee.to_string()),
        ("bonus_presence", derived.bonus_presence.to_string()),
        ("bonus_ranged", derived.bonus_ranged.to_string()),
        ("attributes_and_skills", roll_lists(character)),
        ("gender", gender),
        ("gold", derived.gold.to_string()),
        ("height", xml_escape(&character.height)),
        ("equipment", equipment(&character.equipment)),
        ("languages", languages(&character.languages)),
        ("name", xml_escape(&character.name)),
        ("notes", xml_escape(&notes)),
        ("race", xml_escape(&character.background.homeland)),
        ("resolve", derived.resolve.to_string()),
        ("standing", character.standing.to_string()),
        ("vigor", derived.vigor.to_string()),
    ];

    fill_template(TEMPLATE, &fields)
}

/// Replace every `{{key}}` in one pass. Substituted text is never rescanned;
/// unknown keys are left as they are.
fn fill_template(template: &str, fields: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match fields.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Escape the five XML special characters.
pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn entry_id(n: usize) -> String {
    format!("id-{n:05}")
}

fn abilities(character: &CharacterState) -> String {
    let mut out = String::new();
    for (i, talent) in character.talents.iter().enumerate() {
        let id = entry_id(i + 1);
        let _ = writeln!(
            out,
            "<{id}><name type=\"string\">{}</name>\
             <shortcut type=\"windowreference\"><class>ability</class><recordname></recordname></shortcut>\
             <text type=\"formattedtext\"><p>{}</p></text></{id}>",
            xml_escape(&talent.name),
            xml_escape(&talent.text)
        );
    }
    out
}

/// One dice-roller entry: `2d20` against `target` with `focus`.
fn roll_entry(n: usize, name: &str, target: u32, focus: u32) -> String {
    let id = entry_id(n);
    format!(
        "<{id}><clichatcommand type=\"string\">/conan 2d20x{target}y{focus}</clichatcommand>\
         <description type=\"formattedtext\"><p></p></description>\
         <name type=\"string\">{}</name><rollstype type=\"string\">conan</rollstype>\
         <shortcut type=\"windowreference\"><class>cas</class><recordname></recordname></shortcut></{id}>",
        xml_escape(name)
    )
}

/// The attribute roll followed by one roll per governed skill.
fn attribute_rolls(character: &CharacterState, attribute: Attribute, next: &mut usize) -> String {
    let score = character.attribute(attribute);
    let mut out = roll_entry(*next, &format!("{attribute} - {score}"), score, 0);
    *next += 1;
    for skill in attribute.skills() {
        let ranks = character.skill(skill);
        let name = if ranks.exp > 0 || ranks.foc > 0 {
            format!("{skill} - {}EXP/{}FOC", ranks.exp, ranks.foc)
        } else {
            skill.to_string()
        };
        out.push_str(&roll_entry(*next, &name, score + ranks.exp, ranks.foc));
        *next += 1;
    }
    out
}

fn roll_lists(character: &CharacterState) -> String {
    let mut out = String::new();
    for (list, attributes) in ROLL_LISTS {
        let mut next = 1;
        let body: String = attributes
            .iter()
            .map(|&a| attribute_rolls(character, a, &mut next))
            .collect();
        let _ = writeln!(out, "<clilist{list}>{body}</clilist{list}>");
    }
    out
}

fn equipment(items: &[String]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let id = entry_id(i + 1);
        let _ = writeln!(
            out,
            "<{id}><carried type=\"number\">1</carried><count type=\"number\">1</count>\
             <isidentified type=\"number\">1</isidentified><name type=\"string\">{}</name>\
             <weight type=\"number\">?</weight></{id}>",
            xml_escape(item)
        );
    }
    out
}

fn languages(spoken: &[String]) -> String {
    let mut out = String::new();
    for (i, language) in spoken.iter().enumerate() {
        let id = entry_id(i + 1);
        let _ = writeln!(
            out,
            "<{id}><name type=\"string\">{}</name></{id}>",
            xml_escape(language)
        );
    }
    out
}

/// Unarmed, thrown and intimidation attacks at 2 + bonus damage dice.
pub fn attacks(derived: &DerivedStats) -> String {
    let dice = |bonus: u32| DiceExpr::new(2 + bonus, Die::D6);
    format!(
        "Unarmed: (Reach 1-Improvised-Stun-2D): {},\\n\
         Throw Rock: (Reach 2-Improvised-Stun-Thrown-2D): {},\\n\
         Intimidate: (Close-Mental-Stun-2D): {},\\n",
        dice(derived.bonus_melee),
        dice(derived.bonus_ranged),
        dice(derived.bonus_presence)
    )
}
