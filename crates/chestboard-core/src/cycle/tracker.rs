//! Owned cycle cache.
//!
//! The cached pair lives in one explicitly-owned slot with an explicit
//! refresh policy, instead of ambient global state recomputed ad hoc from
//! scattered call sites. Reads recompute when the cache is stale (older than
//! `max_age`) or when the cycle has rolled over; a calculation failure is
//! itself cached as an unavailable state so dependent displays can show a
//! placeholder without retrying every read.
//!
//! On refresh the whole state is swapped, never mutated in place.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::calculator::{CycleConfig, CyclePair};

const DEFAULT_MAX_AGE_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CacheState {
    Empty,
    Available {
        pair: CyclePair,
        computed_at: DateTime<Utc>,
    },
    Unavailable {
        computed_at: DateTime<Utc>,
    },
}

/// Single-owner cache around [`CycleConfig::cycle_pair`].
#[derive(Debug, Clone)]
pub struct CycleTracker {
    config: CycleConfig,
    max_age: Duration,
    state: CacheState,
}

impl CycleTracker {
    pub fn new(config: CycleConfig) -> Self {
        Self::with_max_age(config, Duration::seconds(DEFAULT_MAX_AGE_SECS))
    }

    pub fn with_max_age(config: CycleConfig, max_age: Duration) -> Self {
        Self {
            config,
            max_age,
            state: CacheState::Empty,
        }
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// The cycle pair for `now`, recomputing first if the cache is due.
    ///
    /// `None` means the cycle is unavailable (timezone/calendar failure);
    /// callers display a placeholder and skip the countdown.
    pub fn pair(&mut self, now: DateTime<Utc>) -> Option<CyclePair> {
        if self.due(now) {
            self.refresh(now)
        } else {
            match self.state {
                CacheState::Available { pair, .. } => Some(pair),
                _ => None,
            }
        }
    }

    /// Unconditionally recompute from `now`, swapping the cached state.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> Option<CyclePair> {
        self.state = match self.config.cycle_pair(now) {
            Ok(pair) => {
                debug!(
                    start = %pair.current.start,
                    end = %pair.current.end,
                    "cycle cache refreshed"
                );
                CacheState::Available {
                    pair,
                    computed_at: now,
                }
            }
            Err(e) => {
                warn!(error = %e, "cycle calculation failed; marking unavailable");
                CacheState::Unavailable { computed_at: now }
            }
        };
        match self.state {
            CacheState::Available { pair, .. } => Some(pair),
            _ => None,
        }
    }

    fn due(&self, now: DateTime<Utc>) -> bool {
        match self.state {
            CacheState::Empty => true,
            CacheState::Available { pair, computed_at } => {
                now - computed_at >= self.max_age || now > pair.current.end
            }
            CacheState::Unavailable { computed_at } => now - computed_at >= self.max_age,
        }
    }
}
