//! Presentation-layer string formatting.
//!
//! Cycle boundaries are stored as UTC instants; here they are rendered in
//! the viewer's zone with a month/day 12-hour format. Conversion goes
//! through proper offset math, never by parsing formatted strings back into
//! timestamps.

use chrono::{Local, TimeZone};

use crate::cycle::{CountdownSnapshot, CyclePair, CyclePeriod};

/// Shown wherever a cycle could not be computed.
pub const CYCLE_PLACEHOLDER: &str = "Cycle unavailable";

/// Shown when the countdown has reached the cycle end.
pub const CYCLE_ENDED: &str = "Cycle ended";

// "Aug 24, 5:00 PM"
const PERIOD_FORMAT: &str = "%b %-d, %-I:%M %p";

/// Render one cycle period in the given zone, e.g.
/// `"Aug 24, 11:00 AM - Aug 31, 10:59 AM"`.
pub fn format_period_in<Tz: TimeZone>(period: &CyclePeriod, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} - {}",
        period.start.with_timezone(tz).format(PERIOD_FORMAT),
        period.end.with_timezone(tz).format(PERIOD_FORMAT)
    )
}

/// Render one cycle period in the system-local zone.
pub fn format_period(period: &CyclePeriod) -> String {
    format_period_in(period, &Local)
}

/// Render both periods in the given zone as `(current, last)`.
pub fn format_pair_in<Tz: TimeZone>(pair: &CyclePair, tz: &Tz) -> (String, String)
where
    Tz::Offset: std::fmt::Display,
{
    (
        format_period_in(&pair.current, tz),
        format_period_in(&pair.last, tz),
    )
}

/// `"3d 4h 5m 6s"`, or the terminal string once the cycle has ended.
pub fn format_countdown(snapshot: &CountdownSnapshot) -> String {
    if snapshot.terminal {
        return CYCLE_ENDED.to_string();
    }
    format!(
        "{}d {}h {}m {}s",
        snapshot.days, snapshot.hours, snapshot.minutes, snapshot.seconds
    )
}

/// Progress with one decimal place, e.g. `"42.3%"`.
pub fn format_percent(snapshot: &CountdownSnapshot) -> String {
    format!("{:.1}%", snapshot.percent)
}
