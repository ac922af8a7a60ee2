//! CLI frontend for the Lifepath character generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::generate::GenerateArgs;

#[derive(Parser)]
#[command(
    name = "lifepath",
    about = "Roll a sword-and-sorcery character through the life-path tables",
    version
)]
struct Cli {
    /// Make every choice at random instead of prompting
    #[arg(short, long)]
    full_auto: bool,

    /// Roll the life-path dice on random.org
    #[arg(short, long)]
    true_random: bool,

    /// Log every roll and choice to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Experience to spend at random once the life path is done
    #[arg(short, long, default_value = "0")]
    xp: u32,

    /// Directory the character sheet is saved in
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// JSON table file to roll against (default: bundled tables)
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Seed for the local random generators
    #[arg(long)]
    seed: Option<u64>,

    /// Character name; the sheet is saved when one is given
    #[arg(long)]
    name: Option<String>,

    /// Treat "A or B" talent prerequisites as satisfied by either talent
    #[arg(long)]
    any_of_prerequisites: bool,

    /// Print the finished character as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "lifepath=debug,lp_lifepath=debug,lp_mechanics=debug,lp_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let args = GenerateArgs {
        full_auto: cli.full_auto,
        true_random: cli.true_random,
        xp: cli.xp,
        out_dir: cli.out_dir,
        tables: cli.tables,
        seed: cli.seed,
        name: cli.name,
        any_of_prerequisites: cli.any_of_prerequisites,
        json: cli.json,
    };

    if let Err(e) = commands::generate::run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
