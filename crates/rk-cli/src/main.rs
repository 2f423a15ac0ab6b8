//! Terminal front end for the roll-and-keep dice engine.

mod commands;
mod host;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "rk",
    about = "Roll-and-keep dice engine: pools, the Ten Dice Rule, void points and target numbers",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll compact notation such as 6k3, 7d10k4x9+2 or 5k2e
    Roll(commands::roll::RollArgs),

    /// Roll for an actor: skill, ring, trait, weapon damage or a generic action
    Check(commands::check::CheckArgs),

    /// Show an actor's void points and spell slots
    Resources {
        /// Actor JSON file
        #[arg(short, long)]
        actor: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rk=warn,rk_engine=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll(args) => commands::roll::run(&args),
        Commands::Check(args) => commands::check::run(&args),
        Commands::Resources { actor } => commands::resources::run(&actor),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
