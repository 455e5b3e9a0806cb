//! Daylight saving time transitions for the Netherlands.
//!
//! The EU rule is encoded directly (clocks move forward on the last
//! Sunday of March and back on the last Sunday of October), so detection
//! needs no timezone database. Weeks run Monday through Sunday; a Sunday
//! belongs to the week it ends, not the week it starts.

use chrono::{Datelike, Days, NaiveDate};

/// Which direction the clocks move in a transition week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DstTransition {
    Spring, // clocks forward, summer time begins
    Autumn, // clocks back, winter time begins
}

/// The last Sunday of a month: take the month's last day and walk back to
/// Sunday (zero days when it already is one).
fn last_sunday(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of month is always valid");

    let last_day = first_of_next - Days::new(1);
    last_day - Days::new(last_day.weekday().num_days_from_sunday() as u64)
}

/// Date summer time begins (last Sunday of March).
pub fn spring_transition(year: i32) -> NaiveDate {
    last_sunday(year, 3)
}

/// Date winter time begins (last Sunday of October).
pub fn autumn_transition(year: i32) -> NaiveDate {
    last_sunday(year, 10)
}

/// The Monday..Sunday calendar week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - Days::new(date.weekday().num_days_from_monday() as u64);
    (monday, monday + Days::new(6))
}

/// Check whether `date` falls in the week of a DST transition.
///
/// Returns the transition direction when the last Sunday of March or
/// October lies within the Monday..Sunday week containing `date`.
pub fn transition_week(date: NaiveDate) -> Option<DstTransition> {
    let (monday, sunday) = week_bounds(date);
    let year = date.year();

    let spring = spring_transition(year);
    if spring >= monday && spring <= sunday {
        return Some(DstTransition::Spring);
    }

    let autumn = autumn_transition(year);
    if autumn >= monday && autumn <= sunday {
        return Some(DstTransition::Autumn);
    }

    None
}

/// The display string announcing a transition.
pub fn message_for(transition: DstTransition) -> &'static str {
    match transition {
        DstTransition::Spring => "Dit weekend gaat de zomertijd in",
        DstTransition::Autumn => "Dit weekend gaat de wintertijd in",
    }
}

/// The transition notice for `date`, or `None` outside transition weeks.
pub fn transition_message(date: NaiveDate) -> Option<&'static str> {
    transition_week(date).map(message_for)
}

/// Whether summer time is in effect on `date`.
///
/// Date-granular: the spring transition day counts as summer, the autumn
/// transition day as winter. Drives whether the MET clock is displayed
/// separately from CET.
pub fn is_summer_time(date: NaiveDate) -> bool {
    let year = date.year();
    date >= spring_transition(year) && date < autumn_transition(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transition_dates_known_years() {
        assert_eq!(spring_transition(2024), date(2024, 3, 31));
        assert_eq!(autumn_transition(2024), date(2024, 10, 27));
        assert_eq!(spring_transition(2025), date(2025, 3, 30));
        assert_eq!(autumn_transition(2025), date(2025, 10, 26));
        // 2026: March 29 and October 25
        assert_eq!(spring_transition(2026), date(2026, 3, 29));
        assert_eq!(autumn_transition(2026), date(2026, 10, 25));
    }

    #[test]
    fn test_last_sunday_when_month_ends_on_sunday() {
        // March 2024 ends on a Sunday; no walk-back needed
        assert_eq!(spring_transition(2024), date(2024, 3, 31));
    }

    #[test]
    fn test_week_bounds_midweek() {
        let (monday, sunday) = week_bounds(date(2024, 3, 27)); // a Wednesday
        assert_eq!(monday, date(2024, 3, 25));
        assert_eq!(sunday, date(2024, 3, 31));
    }

    #[test]
    fn test_week_bounds_sunday_ends_week() {
        // A Sunday is the last day of its own week
        let (monday, sunday) = week_bounds(date(2024, 3, 31));
        assert_eq!(monday, date(2024, 3, 25));
        assert_eq!(sunday, date(2024, 3, 31));
    }

    #[test]
    fn test_spring_transition_week_membership() {
        // 2024 spring transition week: March 25 through March 31
        for day in 25..=31 {
            assert_eq!(
                transition_week(date(2024, 3, day)),
                Some(DstTransition::Spring),
                "March {} should be in the spring transition week",
                day
            );
        }
    }

    #[test]
    fn test_weeks_before_and_after_are_clear() {
        assert_eq!(transition_week(date(2024, 3, 24)), None); // Sunday before
        assert_eq!(transition_week(date(2024, 4, 1)), None); // Monday after
    }

    #[test]
    fn test_autumn_transition_week() {
        assert_eq!(
            transition_week(date(2024, 10, 21)),
            Some(DstTransition::Autumn)
        );
        assert_eq!(
            transition_week(date(2024, 10, 27)),
            Some(DstTransition::Autumn)
        );
        assert_eq!(transition_week(date(2024, 10, 28)), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            transition_message(date(2024, 3, 27)),
            Some("Dit weekend gaat de zomertijd in")
        );
        assert_eq!(
            transition_message(date(2024, 10, 25)),
            Some("Dit weekend gaat de wintertijd in")
        );
        assert_eq!(transition_message(date(2024, 7, 15)), None);
    }

    #[test]
    fn test_summer_time_boundaries() {
        assert!(!is_summer_time(date(2024, 3, 30)));
        assert!(is_summer_time(date(2024, 3, 31)));
        assert!(is_summer_time(date(2024, 7, 1)));
        assert!(is_summer_time(date(2024, 10, 26)));
        assert!(!is_summer_time(date(2024, 10, 27)));
        assert!(!is_summer_time(date(2024, 12, 31)));
    }
}
