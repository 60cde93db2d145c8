use std::path::PathBuf;

use clap::Subcommand;

use chestboard_core::{
    earned_badges, rank_players, search_players, BadgeHint, BadgeThresholds, HttpRosterSource,
    Player, RankedPlayer, WeekSummary,
};

#[derive(Subcommand)]
pub enum RosterAction {
    /// Leaderboard for the active scoring week
    Current {
        /// Filter by (case-insensitive) name substring
        #[arg(long)]
        search: Option<String>,
    },
    /// Leaderboard for the finished week before it
    Last {
        /// Filter by (case-insensitive) name substring
        #[arg(long)]
        search: Option<String>,
    },
}

pub async fn run(
    action: RosterAction,
    config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    if config.source.base_url.is_empty() {
        return Err("source.base_url is not configured".into());
    }
    let source = HttpRosterSource::from_settings(&config.source)?;

    let (players, search, show_hints) = match action {
        RosterAction::Current { search } => (source.fetch_current().await?, search, false),
        // Last week is settled, so badge hints are worth showing.
        RosterAction::Last { search } => (source.fetch_last().await?, search, true),
    };

    if let Some(updated) = source.last_updated().await? {
        println!("Data updated: {}", updated.with_timezone(&chrono::Local));
        println!();
    }

    let summary = WeekSummary::from_players(&players);
    let ranked = rank_players(players);
    match search.as_deref() {
        Some(query) => {
            let hits = search_players(&ranked, query);
            if hits.is_empty() {
                println!("No players matching {query:?}");
                return Ok(());
            }
            print_rows(hits.into_iter(), &config.badges, show_hints);
        }
        None => {
            print_rows(ranked.iter(), &config.badges, show_hints);
            println!();
            print_summary(&summary);
        }
    }
    Ok(())
}

fn print_rows<'a>(
    rows: impl Iterator<Item = &'a RankedPlayer>,
    thresholds: &BadgeThresholds,
    show_hints: bool,
) {
    println!("{:>4}  {:<24} {:>8} {:>7}  Badges", "Rank", "Name", "Score", "Chests");
    for ranked in rows {
        let player = &ranked.player;
        let badges = badge_column(player, thresholds, show_hints);
        let medal = ranked
            .trophy
            .map(|t| t.to_string())
            .unwrap_or_else(|| "  ".into());
        println!(
            "{:>4}  {:<24} {:>8} {:>7}  {} {}",
            ranked.rank, player.name, player.score, player.chests, medal, badges
        );
    }
}

fn badge_column(player: &Player, thresholds: &BadgeThresholds, show_hints: bool) -> String {
    let earned = earned_badges(player, thresholds);
    if !earned.is_empty() {
        return earned
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ");
    }
    if show_hints {
        if let Some(hint) = BadgeHint::for_player(player, thresholds) {
            return hint.to_string();
        }
    }
    String::new()
}

fn print_summary(summary: &WeekSummary) {
    println!("Warriors: {}", summary.participants);
    println!("Average score: {}", summary.avg_score);
    println!("Average chests: {}", summary.avg_chests);
    if let Some(winner) = &summary.winner {
        println!("Top: {} ({})", winner, summary.top_score);
    }
}
