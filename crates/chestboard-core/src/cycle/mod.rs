mod calculator;
mod countdown;
mod ticker;
mod tracker;

pub use calculator::{CycleConfig, CyclePair, CyclePeriod};
pub use countdown::{progress_percent, CountdownSnapshot};
pub use ticker::{spawn as spawn_ticker, TickerHandle};
pub use tracker::CycleTracker;
