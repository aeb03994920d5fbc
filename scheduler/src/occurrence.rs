//! Next-occurrence computation for recurring triggers.
//
//  Pure calendar math over the configured timezone; the engine re-runs it
//  after every fire so timers re-arm from a fresh `now` and never drift.

use chrono::{DateTime, Datelike, LocalResult, TimeZone};
use chrono_tz::Tz;

use crate::dayset::DaySet;

/// Next instant strictly after `after` that lands on `hour:minute:00` on an
/// allowed weekday, in `tz`.
///
/// Local times that do not exist (DST spring-forward gap) skip to the next
/// allowed day; ambiguous times (fall-back) take the earlier instant.
/// Returns `None` only for a `DaySet` that matches nothing, which the
/// parser does not produce.
pub fn next_occurrence(
    after: DateTime<Tz>,
    hour: u32,
    minute: u32,
    days: &DaySet,
    tz: Tz,
) -> Option<DateTime<Tz>> {
    let mut date = after.date_naive();

    // One full week plus a day covers any mask and any DST gap.
    for _ in 0..9 {
        if days.contains(date.weekday()) {
            if let Some(naive) = date.and_hms_opt(hour, minute, 0) {
                let candidate = match tz.from_local_datetime(&naive) {
                    LocalResult::Single(dt) => Some(dt),
                    LocalResult::Ambiguous(earlier, _) => Some(earlier),
                    LocalResult::None => None,
                };
                if let Some(dt) = candidate {
                    if dt > after {
                        return Some(dt);
                    }
                }
            }
        }
        date = date.succ_opt()?;
    }

    None
}
