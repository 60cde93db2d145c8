use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;

use chestboard_core::{display, spawn_ticker, CountdownSnapshot, CycleTracker, Event};

#[derive(Subcommand)]
pub enum CountdownAction {
    /// Print one countdown/progress snapshot as JSON
    Show,
    /// Tick once per second until interrupted
    Watch {
        /// Tick interval in milliseconds
        #[arg(long, default_value = "1000")]
        interval_ms: u64,
    },
}

pub async fn run(
    action: CountdownAction,
    config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let cycle_config = config.cycle_config()?;
    let mut tracker = CycleTracker::new(cycle_config);

    match action {
        CountdownAction::Show => {
            let Some(pair) = tracker.pair(Utc::now()) else {
                println!("{}", display::CYCLE_PLACEHOLDER);
                return Ok(());
            };
            let snapshot = CountdownSnapshot::at(&pair, Utc::now());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        CountdownAction::Watch { interval_ms } => {
            let (mut events, handle) =
                spawn_ticker(tracker, Duration::from_millis(interval_ms));

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    event = events.recv() => match event {
                        Some(Event::CountdownTick { snapshot, .. }) => {
                            println!(
                                "{}  ({})",
                                display::format_countdown(&snapshot),
                                display::format_percent(&snapshot)
                            );
                        }
                        Some(Event::CycleRolled { start, end, .. }) => {
                            println!("New cycle: {} - {}", start.to_rfc3339(), end.to_rfc3339());
                        }
                        Some(Event::CycleUnavailable { .. }) => {
                            println!("{}", display::CYCLE_PLACEHOLDER);
                        }
                        None => break,
                    },
                }
            }
            handle.stop().await;
        }
    }
    Ok(())
}
