//! # Chestboard Core Library
//!
//! Core logic for the Chestboard clan leaderboard: the weekly scoring-cycle
//! engine plus the roster layer built on top of it. The CLI binary is a thin
//! layer over this crate; a web front-end would sit on the same API.
//!
//! ## Architecture
//!
//! - **Cycle engine**: a pure calculator maps any instant to the enclosing
//!   7-day scoring cycle; an owned tracker caches the result; a stoppable
//!   tokio ticker turns it into once-per-second countdown events
//! - **Roster**: ranking, search, weekly KPIs and achievement badges over
//!   week-scoped player records
//! - **Source**: HTTP/JSON client for the hosted roster backend
//! - **Config**: TOML deployment configuration (the cycle anchor is required
//!   and validated at load)
//!
//! ## Key Components
//!
//! - [`CycleConfig`]: the recurrence rule and boundary calculator
//! - [`CycleTracker`]: explicitly-owned cycle cache
//! - [`CountdownSnapshot`]: remaining time + progress percentage
//! - [`Config`]: deployment configuration management

pub mod config;
pub mod cycle;
pub mod display;
pub mod error;
pub mod events;
pub mod roster;
pub mod source;

pub use config::Config;
pub use cycle::{
    progress_percent, spawn_ticker, CountdownSnapshot, CycleConfig, CyclePair, CyclePeriod,
    CycleTracker, TickerHandle,
};
pub use error::{ConfigError, CoreError, CycleError, SourceError, ValidationError};
pub use events::Event;
pub use roster::{
    badge_progress, earned_badges, rank_players, search_players, Badge, BadgeHint, BadgeStatus,
    BadgeThresholds, Player, RankedPlayer, Trophy, WeekSummary,
};
pub use source::HttpRosterSource;
