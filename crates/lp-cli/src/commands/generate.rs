use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;
use lp_core::{CharacterState, Gender, TableStore};
use lp_lifepath::{AutoChooser, GeneratorConfig, PromptChooser, SelectionMode, generate};
use lp_mechanics::OrSemantics;

use super::export::write_sheet;
use super::report::print_character;

/// Options collected from the command line.
pub struct GenerateArgs {
    pub full_auto: bool,
    pub true_random: bool,
    pub xp: u32,
    pub out_dir: PathBuf,
    pub tables: Option<PathBuf>,
    pub seed: Option<u64>,
    pub name: Option<String>,
    pub any_of_prerequisites: bool,
    pub json: bool,
}

impl GenerateArgs {
    fn config(&self) -> GeneratorConfig {
        let mode = if self.full_auto {
            SelectionMode::Automatic
        } else {
            SelectionMode::Interactive
        };
        let semantics = if self.any_of_prerequisites {
            OrSemantics::AnyOf
        } else {
            OrSemantics::Literal
        };
        let config = GeneratorConfig::default()
            .with_mode(mode)
            .with_xp(self.xp)
            .with_true_random(self.true_random)
            .with_or_semantics(semantics);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

pub fn run(args: &GenerateArgs) -> Result<(), String> {
    let tables = load_tables(args.tables.as_deref())?;
    let config = args.config();
    tracing::debug!(?config, "generator configured");

    let mut dice = config.dice_source().map_err(|e| e.to_string())?;
    let mut local = config.local_source();

    let character = match config.mode {
        SelectionMode::Automatic => {
            let mut chooser = AutoChooser::new(config.choice_source());
            let mut character = generate(&tables, dice.as_mut(), &mut local, &mut chooser, &config)
                .map_err(|e| e.to_string())?;
            character.name = args.name.clone().unwrap_or_default();
            character
        }
        SelectionMode::Interactive => {
            let stdin = io::stdin();
            let mut chooser = PromptChooser::new(stdin.lock(), io::stdout());
            let mut character = generate(&tables, dice.as_mut(), &mut local, &mut chooser, &config)
                .map_err(|e| e.to_string())?;
            character.name = match &args.name {
                Some(name) => name.clone(),
                None => chooser
                    .ask(&name_prompt(&character))
                    .map_err(|e| e.to_string())?,
            };
            character
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&character)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{json}");
    } else if character.name.is_empty() {
        print_character(&character);
    }

    if !character.name.is_empty() {
        let path = write_sheet(&character, &args.out_dir)?;
        println!("  {} {}", "Saved to".bold(), path.display());
    }
    Ok(())
}

fn load_tables(path: Option<&Path>) -> Result<TableStore, String> {
    match path {
        Some(path) => {
            TableStore::load(path).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => TableStore::bundled().map_err(|e| e.to_string()),
    }
}

fn name_prompt(character: &CharacterState) -> String {
    let pronoun = match character.gender {
        Some(Gender::Female) => "her",
        _ => "him",
    };
    format!("Enter a name for your character to save {pronoun}, or leave blank to print the summary:")
}
