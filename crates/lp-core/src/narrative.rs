//! Prose summary of a generated character.

use std::fmt::Write;

use crate::character::CharacterState;

/// Lower-case the first character of a phrase.
pub fn un_capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prefix a phrase with "a" or "an" depending on its first letter.
pub fn with_article(text: &str) -> String {
    match text.chars().next() {
        None => String::new(),
        Some(c) if "aeiou".contains(c.to_ascii_lowercase()) => format!("an {text}"),
        Some(_) => format!("a {text}"),
    }
}

impl CharacterState {
    /// The backstory as prose, followed by a plain stat listing and the
    /// finishing touches checklist.
    pub fn narrative(&self) -> String {
        let b = &self.background;
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "You are {} from the land of {}.",
            with_article(&un_capitalize(&b.caste)),
            b.homeland
        );
        let _ = writeln!(
            out,
            "You are generally considered to be {}.",
            b.aspects.join(", and ")
        );
        let _ = writeln!(
            out,
            "Your past has been defined by {}. {}",
            b.caste_story, b.caste_story_description
        );
        let _ = writeln!(
            out,
            "But you also know that {}.",
            un_capitalize(b.nature_description.trim_end_matches('.'))
        );
        let _ = writeln!(
            out,
            "You describe your education as having been {}. {}",
            b.education, b.education_description
        );
        let _ = writeln!(
            out,
            "Your life has changed since you became {}. These days, {}.",
            with_article(&b.archetype),
            un_capitalize(b.archetype_description.trim_end_matches('.'))
        );
        let _ = writeln!(
            out,
            "Recently, you find your life increasingly defined by {} and your {} nature.",
            un_capitalize(&b.trait_),
            un_capitalize(&b.nature)
        );
        let _ = writeln!(
            out,
            "But you will never forget your time at war, when you {}.",
            b.war_story
        );

        out.push_str("------------------------------------------\n");
        out.push_str(&self.stat_listing());
        out.push_str("\n--------------------------------\n");
        out.push_str(&b.finishing_touches);
        out
    }

    /// Plain-text listing of homeland, languages, standing, attributes,
    /// talents, skills and equipment.
    pub fn stat_listing(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Homeland:\n\t{}", self.background.homeland);
        let _ = writeln!(out, "Languages Spoken:\n\t{}", self.languages.join(", "));
        let _ = writeln!(out, "Social Standing:\n\t{}", self.standing);

        out.push_str("Attributes:\n");
        for (attribute, score) in &self.attributes {
            let _ = writeln!(out, "\t{attribute} - {score}");
        }

        out.push_str("Talents:\n");
        for talent in self.talents.iter() {
            let _ = writeln!(out, "\t{}: {}", talent.name, talent.text);
        }

        out.push_str("Skills:\n");
        for (skill, ranks) in self.skills.iter() {
            let _ = writeln!(out, "\t{skill}: {} EXP/{} FOC", ranks.exp, ranks.foc);
        }

        out.push_str("Equipment:\n");
        for item in &self.equipment {
            let _ = writeln!(out, "\t{item}");
        }
        out
    }
}
