use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "chestboard", version, about = "Chestboard CLI")]
struct Cli {
    /// Path to the configuration file (defaults to the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Weekly cycle boundaries
    Cycle {
        #[command(subcommand)]
        action: commands::cycle::CycleAction,
    },
    /// Countdown and week progress
    Countdown {
        #[command(subcommand)]
        action: commands::countdown::CountdownAction,
    },
    /// Leaderboard roster
    Roster {
        #[command(subcommand)]
        action: commands::roster::RosterAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Cycle { action } => commands::cycle::run(action, cli.config),
        Commands::Countdown { action } => commands::countdown::run(action, cli.config).await,
        Commands::Roster { action } => commands::roster::run(action, cli.config).await,
        Commands::Config { action } => commands::config::run(action, cli.config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
