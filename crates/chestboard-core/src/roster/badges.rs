//! Achievement badge derivation.
//!
//! Badges are threshold predicates over a player's weekly score and chest
//! count. Thresholds come from configuration; the defaults match the live
//! deployment.

use serde::{Deserialize, Serialize};

use super::Player;

/// Derived achievement labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    /// Opened at least `chest_hero_chests` chests.
    ChestHero,
    /// Scored at least `legend_score` points.
    Legend,
    /// Cleared both the consistent chest and score bars.
    Consistent,
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Badge::ChestHero => write!(f, "Chest Hero"),
            Badge::Legend => write!(f, "Legend"),
            Badge::Consistent => write!(f, "Consistent"),
        }
    }
}

/// Badge thresholds, configurable per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeThresholds {
    #[serde(default = "default_chest_hero_chests")]
    pub chest_hero_chests: u64,
    #[serde(default = "default_legend_score")]
    pub legend_score: u64,
    #[serde(default = "default_consistent_chests")]
    pub consistent_chests: u64,
    #[serde(default = "default_consistent_score")]
    pub consistent_score: u64,
}

fn default_chest_hero_chests() -> u64 {
    100
}
fn default_legend_score() -> u64 {
    2000
}
fn default_consistent_chests() -> u64 {
    70
}
fn default_consistent_score() -> u64 {
    1000
}

impl Default for BadgeThresholds {
    fn default() -> Self {
        Self {
            chest_hero_chests: default_chest_hero_chests(),
            legend_score: default_legend_score(),
            consistent_chests: default_consistent_chests(),
            consistent_score: default_consistent_score(),
        }
    }
}

/// All badges this player has earned.
pub fn earned_badges(player: &Player, thresholds: &BadgeThresholds) -> Vec<Badge> {
    let mut badges = Vec::new();
    if player.chests >= thresholds.chest_hero_chests {
        badges.push(Badge::ChestHero);
    }
    if player.score >= thresholds.legend_score {
        badges.push(Badge::Legend);
    }
    if player.chests >= thresholds.consistent_chests && player.score >= thresholds.consistent_score
    {
        badges.push(Badge::Consistent);
    }
    badges
}

/// Per-badge progress for the player detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeStatus {
    pub badge: Badge,
    pub earned: bool,
    /// Chests still missing toward this badge (0 when satisfied).
    pub chests_needed: u64,
    /// Points still missing toward this badge (0 when satisfied).
    pub points_needed: u64,
}

/// Progress toward every badge, earned or not.
pub fn badge_progress(player: &Player, thresholds: &BadgeThresholds) -> Vec<BadgeStatus> {
    let chest_hero_gap = thresholds.chest_hero_chests.saturating_sub(player.chests);
    let legend_gap = thresholds.legend_score.saturating_sub(player.score);
    let consistent_chest_gap = thresholds.consistent_chests.saturating_sub(player.chests);
    let consistent_score_gap = thresholds.consistent_score.saturating_sub(player.score);

    vec![
        BadgeStatus {
            badge: Badge::ChestHero,
            earned: chest_hero_gap == 0,
            chests_needed: chest_hero_gap,
            points_needed: 0,
        },
        BadgeStatus {
            badge: Badge::Legend,
            earned: legend_gap == 0,
            chests_needed: 0,
            points_needed: legend_gap,
        },
        BadgeStatus {
            badge: Badge::Consistent,
            earned: consistent_chest_gap == 0 && consistent_score_gap == 0,
            chests_needed: consistent_chest_gap,
            points_needed: consistent_score_gap,
        },
    ]
}

/// Encouragement hint for a player with no badges yet: the badge with the
/// smallest remaining gap wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeHint {
    ChestHero { chests_needed: u64 },
    Legend { points_needed: u64 },
    Consistent { chests_needed: u64, points_needed: u64 },
}

impl BadgeHint {
    /// `None` once the player has earned any badge.
    pub fn for_player(player: &Player, thresholds: &BadgeThresholds) -> Option<BadgeHint> {
        if !earned_badges(player, thresholds).is_empty() {
            return None;
        }

        let to_chest = thresholds.chest_hero_chests.saturating_sub(player.chests);
        let to_legend = thresholds.legend_score.saturating_sub(player.score);
        let to_cons_chests = thresholds.consistent_chests.saturating_sub(player.chests);
        let to_cons_points = thresholds.consistent_score.saturating_sub(player.score);
        let to_consistent = to_cons_chests.max(to_cons_points);

        if to_chest <= to_legend && to_chest <= to_consistent {
            Some(BadgeHint::ChestHero {
                chests_needed: to_chest,
            })
        } else if to_legend <= to_consistent {
            Some(BadgeHint::Legend {
                points_needed: to_legend,
            })
        } else {
            Some(BadgeHint::Consistent {
                chests_needed: to_cons_chests,
                points_needed: to_cons_points,
            })
        }
    }
}

impl std::fmt::Display for BadgeHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeHint::ChestHero { chests_needed } => {
                write!(f, "🍪 Only {chests_needed} more chests to earn the hero badge!")
            }
            BadgeHint::Legend { points_needed } => {
                write!(f, "⭐ Only {points_needed} more points to become a legend!")
            }
            BadgeHint::Consistent {
                chests_needed: 0,
                points_needed,
            } => {
                write!(f, "🎯 Only {points_needed} more points to earn consistent badge!")
            }
            BadgeHint::Consistent {
                chests_needed,
                points_needed: 0,
            } => {
                write!(f, "🎯 Only {chests_needed} more chests to earn consistent badge!")
            }
            BadgeHint::Consistent {
                chests_needed,
                points_needed,
            } => {
                write!(
                    f,
                    "🎯 Only {chests_needed} chests & {points_needed} points to earn consistent badge!"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(score: u64, chests: u64) -> Player {
        Player::new("Tester", score, chests).unwrap()
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let t = BadgeThresholds::default();
        assert_eq!(earned_badges(&player(0, 100), &t), vec![Badge::ChestHero]);
        assert!(earned_badges(&player(0, 99), &t).is_empty());
        assert_eq!(earned_badges(&player(2000, 0), &t), vec![Badge::Legend]);
        assert!(earned_badges(&player(1999, 0), &t).is_empty());
    }

    #[test]
    fn test_consistent_requires_both_bars() {
        let t = BadgeThresholds::default();
        assert!(earned_badges(&player(1000, 69), &t).is_empty());
        assert!(earned_badges(&player(999, 70), &t).is_empty());
        assert_eq!(earned_badges(&player(1000, 70), &t), vec![Badge::Consistent]);
    }

    #[test]
    fn test_all_badges_at_once() {
        let t = BadgeThresholds::default();
        let badges = earned_badges(&player(2500, 120), &t);
        assert_eq!(badges, vec![Badge::ChestHero, Badge::Legend, Badge::Consistent]);
    }

    #[test]
    fn test_hint_none_once_any_badge_earned() {
        let t = BadgeThresholds::default();
        assert_eq!(BadgeHint::for_player(&player(2000, 0), &t), None);
    }

    #[test]
    fn test_hint_picks_closest_path() {
        let t = BadgeThresholds::default();
        // 10 chests from Chest Hero, far from everything else.
        assert_eq!(
            BadgeHint::for_player(&player(0, 90), &t),
            Some(BadgeHint::ChestHero { chests_needed: 10 })
        );
        // 50 points from Legend, chests nowhere close.
        assert_eq!(
            BadgeHint::for_player(&player(1950, 0), &t),
            Some(BadgeHint::Legend { points_needed: 50 })
        );
        // Consistent is the nearest: 5 chests and 10 points away.
        assert_eq!(
            BadgeHint::for_player(&player(990, 65), &t),
            Some(BadgeHint::Consistent {
                chests_needed: 5,
                points_needed: 10
            })
        );
    }

    #[test]
    fn test_hint_display_single_missing_axis() {
        let hint = BadgeHint::Consistent {
            chests_needed: 3,
            points_needed: 0,
        };
        assert_eq!(
            hint.to_string(),
            "🎯 Only 3 more chests to earn consistent badge!"
        );
    }

    #[test]
    fn test_badge_progress_gaps() {
        let t = BadgeThresholds::default();
        let progress = badge_progress(&player(1200, 80), &t);
        assert_eq!(progress[0].badge, Badge::ChestHero);
        assert!(!progress[0].earned);
        assert_eq!(progress[0].chests_needed, 20);
        assert!(!progress[1].earned);
        assert_eq!(progress[1].points_needed, 800);
        assert!(progress[2].earned);
    }
}
