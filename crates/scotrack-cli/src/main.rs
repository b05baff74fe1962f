//! scotrack CLI — developer tooling for file-backed cmi stores.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "scotrack", version, about = "SCORM 1.2 tracking dev tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a cmi store as a table
    Dump {
        /// Path to the JSON cmi store
        #[arg(long)]
        store: PathBuf,
    },

    /// Clear a cmi store
    Reset {
        /// Path to the JSON cmi store
        #[arg(long)]
        store: PathBuf,
    },

    /// Replay a TOML lesson script against a cmi store
    Simulate {
        /// Path to the JSON cmi store
        #[arg(long)]
        store: PathBuf,

        /// Path to the lesson script
        #[arg(long)]
        script: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scotrack_core=info".parse().unwrap())
                .add_directive("scotrack_conn=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dump { store } => commands::dump::execute(store),
        Commands::Reset { store } => commands::reset::execute(store),
        Commands::Simulate { store, script } => commands::simulate::execute(store, script),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
