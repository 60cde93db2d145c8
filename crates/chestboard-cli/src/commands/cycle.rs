use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;

use chestboard_core::{display, CycleTracker};

#[derive(Subcommand)]
pub enum CycleAction {
    /// Print current and last cycle boundaries
    Show {
        /// Emit raw UTC boundaries as JSON instead of local-time text
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CycleAction, config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let cycle_config = config.cycle_config()?;

    match action {
        CycleAction::Show { json } => {
            let mut tracker = CycleTracker::new(cycle_config);
            let Some(pair) = tracker.pair(Utc::now()) else {
                println!("{}", display::CYCLE_PLACEHOLDER);
                return Ok(());
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&pair)?);
            } else {
                println!("Current cycle: {}", display::format_period(&pair.current));
                println!("Last cycle:    {}", display::format_period(&pair.last));
                println!();
                println!(
                    "Current (UTC): {} - {}",
                    pair.current.start.to_rfc3339(),
                    pair.current.end.to_rfc3339()
                );
                println!(
                    "Last (UTC):    {} - {}",
                    pair.last.start.to_rfc3339(),
                    pair.last.end.to_rfc3339()
                );
            }
        }
    }
    Ok(())
}
