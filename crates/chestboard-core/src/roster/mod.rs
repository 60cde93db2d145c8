//! Player roster: ranking, search and weekly KPIs.
//!
//! Records arrive from the data source already scoped to one cycle window;
//! everything here is ordering and aggregation over that snapshot.

mod badges;

pub use badges::{badge_progress, earned_badges, Badge, BadgeHint, BadgeStatus, BadgeThresholds};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One player's totals for a single scoring week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u64,
    pub chests: u64,
}

impl Player {
    /// Build a player record, rejecting blank names.
    pub fn new(name: impl Into<String>, score: u64, chests: u64) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "player name must be non-empty".into(),
            });
        }
        Ok(Self { name, score, chests })
    }
}

/// Podium medal for the top three ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trophy {
    Gold,
    Silver,
    Bronze,
}

impl Trophy {
    pub fn for_rank(rank: u32) -> Option<Trophy> {
        match rank {
            1 => Some(Trophy::Gold),
            2 => Some(Trophy::Silver),
            3 => Some(Trophy::Bronze),
            _ => None,
        }
    }
}

impl std::fmt::Display for Trophy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trophy::Gold => write!(f, "🥇"),
            Trophy::Silver => write!(f, "🥈"),
            Trophy::Bronze => write!(f, "🥉"),
        }
    }
}

/// A player with their leaderboard position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub rank: u32,
    pub trophy: Option<Trophy>,
    #[serde(flatten)]
    pub player: Player,
}

/// Sort by score (descending, name as tiebreak) and assign 1-based ranks.
pub fn rank_players(mut players: Vec<Player>) -> Vec<RankedPlayer> {
    players.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    players
        .into_iter()
        .enumerate()
        .map(|(idx, player)| {
            let rank = idx as u32 + 1;
            RankedPlayer {
                rank,
                trophy: Trophy::for_rank(rank),
                player,
            }
        })
        .collect()
}

/// Case-insensitive substring match on player names.
pub fn search_players<'a>(players: &'a [RankedPlayer], query: &str) -> Vec<&'a RankedPlayer> {
    let needle = query.to_lowercase();
    players
        .iter()
        .filter(|p| p.player.name.to_lowercase().contains(&needle))
        .collect()
}

/// Aggregate KPIs for one scoring week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub participants: usize,
    /// Rounded mean score across all participants.
    pub avg_score: u64,
    /// Rounded mean chest count across all participants.
    pub avg_chests: u64,
    /// Highest-scoring player, if the week had any participants.
    pub winner: Option<String>,
    pub top_score: u64,
}

impl WeekSummary {
    pub fn from_players(players: &[Player]) -> Self {
        if players.is_empty() {
            return Self {
                participants: 0,
                avg_score: 0,
                avg_chests: 0,
                winner: None,
                top_score: 0,
            };
        }
        let n = players.len() as f64;
        let total_score: u64 = players.iter().map(|p| p.score).sum();
        let total_chests: u64 = players.iter().map(|p| p.chests).sum();
        let top = players
            .iter()
            .max_by(|a, b| a.score.cmp(&b.score).then_with(|| b.name.cmp(&a.name)));
        Self {
            participants: players.len(),
            avg_score: (total_score as f64 / n).round() as u64,
            avg_chests: (total_chests as f64 / n).round() as u64,
            winner: top.map(|p| p.name.clone()),
            top_score: top.map(|p| p.score).unwrap_or(0),
        }
    }
}
