//! Special-day detection for contextual post flavor.
//
//  Classification is pure date math; whether to actually mention a day is a
//  dice roll, so that part takes an explicit RNG.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Major,
    Tech,
    Fun,
    Minor,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone)]
pub struct SpecialDay {
    pub name: String,
    pub emoji: &'static str,
    pub context: &'static str,
    pub kind: DayKind,
}

fn fixed_day(month: u32, day: u32) -> Option<(&'static str, &'static str, &'static str, DayKind)> {
    let entry = match (month, day) {
        (1, 1) => ("New Year's Day", "🎊", "new beginnings", DayKind::Major),
        (2, 14) => ("Valentine's Day", "❤️", "appreciation", DayKind::Minor),
        (3, 8) => ("International Women's Day", "👩‍💻", "women in tech", DayKind::Major),
        (3, 14) => ("Pi Day", "🥧", "mathematics and engineering", DayKind::Tech),
        (4, 1) => ("April Fools' Day", "🤪", "tech pranks", DayKind::Fun),
        (5, 4) => ("Star Wars Day", "⭐", "May the 4th", DayKind::Fun),
        (6, 1) => ("Pride Month Start", "🏳️‍🌈", "diversity in tech", DayKind::Major),
        (7, 4) => ("Independence Day (US)", "🎆", "independence", DayKind::Major),
        (9, 12) => ("Programmers' Day", "👨‍💻", "celebrating developers", DayKind::Tech),
        (10, 24) => ("World Development Information Day", "🌍", "global development", DayKind::Tech),
        (10, 31) => ("Halloween", "🎃", "debugging nightmares", DayKind::Fun),
        (12, 24) => ("Christmas Eve", "🎄", "holiday season", DayKind::Major),
        (12, 25) => ("Christmas Day", "🎄", "holiday season", DayKind::Major),
        (12, 31) => ("New Year's Eve", "🎉", "year reflection", DayKind::Major),
        _ => return None,
    };
    Some(entry)
}

fn month_name(date: NaiveDate) -> &'static str {
    [
        "January", "February", "March", "April", "May", "June",
        "July", "August", "September", "October", "November", "December",
    ][date.month0() as usize]
}

fn last_day_of_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // First of next month minus one day always exists.
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Classify a date. Fixed holidays win over weekday/month-boundary rules.
pub fn special_day_for(date: NaiveDate) -> Option<SpecialDay> {
    if let Some((name, emoji, context, kind)) = fixed_day(date.month(), date.day()) {
        return Some(SpecialDay {
            name: name.to_string(),
            emoji,
            context,
            kind,
        });
    }

    match date.weekday() {
        Weekday::Mon if date.day() <= 7 => {
            return Some(SpecialDay {
                name: "First Monday of the Month".to_string(),
                emoji: "💪",
                context: "fresh start",
                kind: DayKind::Weekly,
            });
        }
        Weekday::Sun => {
            return Some(SpecialDay {
                name: "Sunday".to_string(),
                emoji: "☕",
                context: "weekend reflection",
                kind: DayKind::Weekly,
            });
        }
        Weekday::Fri => {
            return Some(SpecialDay {
                name: "Friday".to_string(),
                emoji: "🎉",
                context: "wrapping up the week",
                kind: DayKind::Weekly,
            });
        }
        _ => {}
    }

    if date.day() == 1 {
        return Some(SpecialDay {
            name: format!("First day of {}", month_name(date)),
            emoji: "📅",
            context: "new month",
            kind: DayKind::Monthly,
        });
    }
    if date.day() == last_day_of_month(date) {
        return Some(SpecialDay {
            name: format!("Last day of {}", month_name(date)),
            emoji: "📊",
            context: "month-end reflection",
            kind: DayKind::Monthly,
        });
    }

    None
}

/// Major and tech days are always worth a mention; fun days half the time,
/// weekly/monthly milestones less often.
pub fn should_mention<R: Rng + ?Sized>(kind: DayKind, rng: &mut R) -> bool {
    match kind {
        DayKind::Major | DayKind::Tech => true,
        DayKind::Fun => rng.gen_bool(0.5),
        DayKind::Weekly | DayKind::Monthly => rng.gen_bool(0.3),
        DayKind::Minor => false,
    }
}

/// Extra instruction appended to the generation prompt.
pub fn prompt_enhancement(day: &SpecialDay) -> String {
    format!(
        "\nToday is {}. If it fits naturally, you may briefly acknowledge it \
         (theme: {}) in at most one or two sentences. Do not force it.\n",
        day.name, day.context
    )
}

/// Closing line appended to the post when the model did not mention the day
/// itself.
pub fn post_closing<R: Rng + ?Sized>(day: &SpecialDay, rng: &mut R) -> String {
    let templates: Vec<String> = match day.kind {
        DayKind::Major => vec![
            format!("\n\nWishing everyone celebrating a wonderful {}! {}", day.name, day.emoji),
            format!("\n\nHappy {} to all! {} Here's to {} in tech and beyond.", day.name, day.emoji, day.context),
        ],
        DayKind::Tech => vec![
            format!("\n\n{} Happy {}! Perfect timing to discuss {}.", day.emoji, day.name, day.context),
            format!("\n\n{} {} seemed like the perfect day to share this.", day.emoji, day.name),
        ],
        DayKind::Fun => vec![
            format!("\n\n{} Happy {}! Even in tech, we need some levity.", day.emoji, day.name),
            format!("\n\nSince it's {} {}, thought I'd share something relevant.", day.name, day.emoji),
        ],
        DayKind::Weekly | DayKind::Monthly | DayKind::Minor => vec![
            format!("\n\n{} Perfect timing for some {} energy.", day.emoji, day.context),
        ],
    };

    let idx = rng.gen_range(0..templates.len());
    templates[idx].clone()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fixed_holiday_is_detected() {
        let day = special_day_for(date(2026, 12, 25)).unwrap();
        assert_eq!(day.name, "Christmas Day");
        assert_eq!(day.kind, DayKind::Major);
    }

    #[test]
    fn fixed_holiday_wins_over_weekday_rule() {
        // 2027-10-31 is a Sunday, but Halloween takes precedence.
        let day = special_day_for(date(2027, 10, 31)).unwrap();
        assert_eq!(day.name, "Halloween");
        assert_eq!(day.kind, DayKind::Fun);
    }

    #[test]
    fn first_monday_of_month_is_weekly() {
        // 2026-08-03 is the first Monday of August.
        let day = special_day_for(date(2026, 8, 3)).unwrap();
        assert_eq!(day.kind, DayKind::Weekly);

        // 2026-08-10 is a Monday but not within the first week.
        assert!(special_day_for(date(2026, 8, 10)).is_none());
    }

    #[test]
    fn month_boundaries_are_monthly() {
        // Not a Friday/Sunday, not a fixed day: 2026-09-30 is a Wednesday.
        let day = special_day_for(date(2026, 9, 30)).unwrap();
        assert_eq!(day.kind, DayKind::Monthly);
        assert!(day.name.contains("September"));
    }

    #[test]
    fn ordinary_day_is_none() {
        // 2026-08-11 is a plain Tuesday.
        assert!(special_day_for(date(2026, 8, 11)).is_none());
    }

    #[test]
    fn major_and_tech_days_are_always_mentioned() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(should_mention(DayKind::Major, &mut rng));
        assert!(should_mention(DayKind::Tech, &mut rng));
        assert!(!should_mention(DayKind::Minor, &mut rng));
    }

    #[test]
    fn closing_mentions_the_day_name() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let day = special_day_for(date(2026, 9, 12)).unwrap();
        let closing = post_closing(&day, &mut rng);
        assert!(closing.contains("Programmers' Day"));
    }
}
