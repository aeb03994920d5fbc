//! Day-of-week masks in the `mon-fri` / `mon,wed,fri` notation used by
//! schedule configuration.

use std::str::FromStr;

use chrono::Weekday;

use crate::error::SchedulerError;

/// A non-empty set of weekdays a job may fire on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySet(u8);

const DAY_NAMES: [(&str, Weekday); 7] = [
    ("mon", Weekday::Mon),
    ("tue", Weekday::Tue),
    ("wed", Weekday::Wed),
    ("thu", Weekday::Thu),
    ("fri", Weekday::Fri),
    ("sat", Weekday::Sat),
    ("sun", Weekday::Sun),
];

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}

fn parse_day(name: &str) -> Option<Weekday> {
    let name = name.trim().to_ascii_lowercase();
    DAY_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, day)| *day)
}

impl DaySet {
    pub fn every_day() -> Self {
        Self(0b0111_1111)
    }

    pub fn weekdays() -> Self {
        Self(bit(Weekday::Mon)
            | bit(Weekday::Tue)
            | bit(Weekday::Wed)
            | bit(Weekday::Thu)
            | bit(Weekday::Fri))
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }
}

impl FromStr for DaySet {
    type Err = SchedulerError;

    /// Accepts single days (`"wed"`), ranges (`"mon-fri"`, wrapping ranges
    /// like `"sat-mon"` included) and comma lists (`"mon,wed,fri"`), in any
    /// combination. Rejects empty input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SchedulerError::InvalidDaySet(s.to_string());

        let mut mask = 0u8;
        for part in s.split(',') {
            let part = part.trim();
            match part.split_once('-') {
                Some((from, to)) => {
                    let from = parse_day(from).ok_or_else(bad)?;
                    let to = parse_day(to).ok_or_else(bad)?;

                    let mut day = from;
                    loop {
                        mask |= bit(day);
                        if day == to {
                            break;
                        }
                        day = day.succ();
                    }
                }
                None => {
                    mask |= bit(parse_day(part).ok_or_else(bad)?);
                }
            }
        }

        if mask == 0 {
            return Err(bad());
        }
        Ok(Self(mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_day_contains_all_seven() {
        let days = DaySet::every_day();
        for (_, day) in DAY_NAMES {
            assert!(days.contains(day));
        }
    }

    #[test]
    fn parses_full_week_range() {
        let days: DaySet = "mon-sun".parse().unwrap();
        assert_eq!(days, DaySet::every_day());
    }

    #[test]
    fn parses_weekday_range() {
        let days: DaySet = "mon-fri".parse().unwrap();
        assert_eq!(days, DaySet::weekdays());
        assert!(!days.contains(Weekday::Sat));
    }

    #[test]
    fn parses_comma_list() {
        let days: DaySet = "mon,wed,fri".parse().unwrap();
        assert!(days.contains(Weekday::Wed));
        assert!(!days.contains(Weekday::Tue));
    }

    #[test]
    fn parses_wrapping_range() {
        let days: DaySet = "sat-mon".parse().unwrap();
        assert!(days.contains(Weekday::Sat));
        assert!(days.contains(Weekday::Sun));
        assert!(days.contains(Weekday::Mon));
        assert!(!days.contains(Weekday::Tue));
    }

    #[test]
    fn rejects_unknown_day() {
        assert!("mon-xyz".parse::<DaySet>().is_err());
        assert!("someday".parse::<DaySet>().is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!("".parse::<DaySet>().is_err());
        assert!("  ".parse::<DaySet>().is_err());
    }
}
