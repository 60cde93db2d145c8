//! Countdown and progress math for the active cycle.
//!
//! Pure functions over `(CyclePair, now)`. Invoked once per second by the
//! ticker; never mutates the cached pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calculator::CyclePair;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Remaining time in the current cycle, plus how far along it is.
///
/// Fields truncate toward zero; there is no rounding up. `percent` is clamped
/// to `0.0..=100.0` even if the reference clock sits slightly outside the
/// cycle window, and renders with one decimal place (see
/// [`crate::display::format_percent`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub days: i64,
    /// 0-23
    pub hours: u32,
    /// 0-59
    pub minutes: u32,
    /// 0-59
    pub seconds: u32,
    /// True once `now` has reached the cycle end; all fields are zero and
    /// percent is 100.
    pub terminal: bool,
    pub percent: f64,
}

impl CountdownSnapshot {
    /// Compute the snapshot for `now` against `pair.current`.
    pub fn at(pair: &CyclePair, now: DateTime<Utc>) -> Self {
        let cycle = &pair.current;
        let remaining_ms = (cycle.end - now).num_milliseconds();

        if remaining_ms <= 0 {
            return Self {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0,
                terminal: true,
                percent: 100.0,
            };
        }

        let days = remaining_ms / MS_PER_DAY;
        let hours = (remaining_ms % MS_PER_DAY) / MS_PER_HOUR;
        let minutes = (remaining_ms % MS_PER_HOUR) / MS_PER_MINUTE;
        let seconds = (remaining_ms % MS_PER_MINUTE) / MS_PER_SECOND;

        Self {
            days,
            hours: hours as u32,
            minutes: minutes as u32,
            seconds: seconds as u32,
            terminal: false,
            percent: progress_percent(pair, now),
        }
    }
}

/// 0.0 .. 100.0 fraction of the current cycle already elapsed.
///
/// Clamped at both ends so clock skew never produces a negative bar or one
/// past full.
pub fn progress_percent(pair: &CyclePair, now: DateTime<Utc>) -> f64 {
    let cycle = &pair.current;
    let total = (cycle.end - cycle.start).num_milliseconds();
    if total <= 0 {
        return 100.0;
    }
    let elapsed = (now - cycle.start).num_milliseconds();
    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::calculator::CycleConfig;
    use chrono::{Duration, TimeZone, Weekday};
    use chrono_tz::UTC;

    fn pair() -> CyclePair {
        let config = CycleConfig::new(Weekday::Sun, 17, UTC).unwrap();
        // Wednesday inside the cycle starting Sunday 2025-08-24 17:00 UTC.
        let t = Utc.with_ymd_and_hms(2025, 8, 27, 12, 0, 0).unwrap();
        config.cycle_pair(t).unwrap()
    }

    #[test]
    fn test_decomposition_truncates_toward_zero() {
        let p = pair();
        let now = p.current.end
            - Duration::days(3)
            - Duration::hours(4)
            - Duration::minutes(5)
            - Duration::seconds(6)
            - Duration::milliseconds(700);
        let snap = CountdownSnapshot::at(&p, now);
        assert!(!snap.terminal);
        assert_eq!(snap.days, 3);
        assert_eq!(snap.hours, 4);
        assert_eq!(snap.minutes, 5);
        // 6.7 seconds remaining in the second bucket truncates to 6.
        assert_eq!(snap.seconds, 6);
    }

    #[test]
    fn test_terminal_at_end() {
        let p = pair();
        let snap = CountdownSnapshot::at(&p, p.current.end);
        assert!(snap.terminal);
        assert_eq!((snap.days, snap.hours, snap.minutes, snap.seconds), (0, 0, 0, 0));
        assert_eq!(snap.percent, 100.0);
    }

    #[test]
    fn test_terminal_past_end_never_goes_negative() {
        let p = pair();
        let snap = CountdownSnapshot::at(&p, p.current.end + Duration::milliseconds(1));
        assert!(snap.terminal);
        assert_eq!((snap.days, snap.hours, snap.minutes, snap.seconds), (0, 0, 0, 0));
    }

    #[test]
    fn test_one_millisecond_before_end() {
        let p = pair();
        let snap = CountdownSnapshot::at(&p, p.current.end - Duration::milliseconds(1));
        assert!(!snap.terminal);
        assert_eq!((snap.days, snap.hours, snap.minutes, snap.seconds), (0, 0, 0, 0));
    }

    #[test]
    fn test_percent_zero_at_start() {
        let p = pair();
        assert_eq!(progress_percent(&p, p.current.start), 0.0);
    }

    #[test]
    fn test_percent_hundred_at_end() {
        let p = pair();
        assert_eq!(progress_percent(&p, p.current.end), 100.0);
    }

    #[test]
    fn test_percent_midway() {
        let p = pair();
        let midway = p.current.start + Duration::hours(84); // 3.5 days
        let pct = progress_percent(&p, midway);
        assert!((pct - 50.0).abs() < 0.01, "got {pct}");
    }

    #[test]
    fn test_percent_clamped_under_clock_skew() {
        let p = pair();
        assert_eq!(progress_percent(&p, p.current.start - Duration::seconds(30)), 0.0);
        assert_eq!(progress_percent(&p, p.current.end + Duration::seconds(30)), 100.0);
    }

    #[test]
    fn test_snapshot_is_pure() {
        let p = pair();
        let now = p.current.start + Duration::days(2);
        assert_eq!(CountdownSnapshot::at(&p, now), CountdownSnapshot::at(&p, now));
    }
}
