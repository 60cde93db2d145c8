use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::CountdownSnapshot;

/// Everything the ticker observes produces an Event.
/// The presentation layer consumes these; nothing here touches rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Once-per-second countdown/progress reading for the active cycle.
    CountdownTick {
        snapshot: CountdownSnapshot,
        at: DateTime<Utc>,
    },
    /// The active cycle changed (a new scoring week began).
    CycleRolled {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// Cycle boundaries could not be computed; displays show placeholders.
    CycleUnavailable { at: DateTime<Utc> },
}
