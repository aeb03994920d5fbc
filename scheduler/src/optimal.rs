//! Advisory check for manually timed posts.
//
//  Pure predicate; the scheduler itself never gates fires on it.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};
use std::ops::RangeInclusive;

/// Engagement windows: start of the workday, lunch, after work.
pub const MORNING_HOURS: RangeInclusive<u32> = 7..=10;
pub const MIDDAY_HOURS: RangeInclusive<u32> = 12..=14;
pub const EVENING_HOURS: RangeInclusive<u32> = 17..=20;

/// True iff `dt` falls on a weekday inside one of the engagement windows.
pub fn is_optimal_time<Z: TimeZone>(dt: &DateTime<Z>) -> bool {
    if matches!(dt.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    let hour = dt.hour();
    MORNING_HOURS.contains(&hour) || MIDDAY_HOURS.contains(&hour) || EVENING_HOURS.contains(&hour)
}
