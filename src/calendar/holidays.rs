//! Dutch holiday calendar.
//!
//! A pure lookup from a calendar date to a holiday name. Fixed-date
//! holidays are checked first, then King's Day (which shifts a day when
//! the 27th of April falls on a Sunday), then the moveable feasts derived
//! from Easter Sunday. The function is total: any valid date yields either
//! a name or `None`, never an error.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Compute Easter Sunday for `year` with the Meeus/Jones/Butcher algorithm.
///
/// The closed-form integer sequence below is valid for any Gregorian year
/// and always lands in March or April.
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .expect("Easter computation yields a valid March/April date")
}

/// The Easter-derived moveable feasts for one year.
///
/// All dates are fixed day offsets from Easter Sunday; they are never
/// recalculated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveableFeasts {
    pub good_friday: NaiveDate,
    pub easter_sunday: NaiveDate,
    pub easter_monday: NaiveDate,
    pub ascension_day: NaiveDate,
    pub pentecost_sunday: NaiveDate,
    pub pentecost_monday: NaiveDate,
}

impl MoveableFeasts {
    pub fn for_year(year: i32) -> Self {
        let easter = easter_sunday(year);
        Self {
            good_friday: easter - Days::new(2),
            easter_sunday: easter,
            easter_monday: easter + Days::new(1),
            ascension_day: easter + Days::new(39),
            pentecost_sunday: easter + Days::new(49),
            pentecost_monday: easter + Days::new(50),
        }
    }
}

/// The observed King's Day date for `year`.
///
/// Celebrated on April 27, or April 26 when the 27th falls on a Sunday.
/// Only the observed date returns the holiday name that year.
pub fn kings_day(year: i32) -> NaiveDate {
    let nominal = NaiveDate::from_ymd_opt(year, 4, 27)
        .expect("April 27 exists in every year");
    if nominal.weekday() == Weekday::Sun {
        nominal - Days::new(1)
    } else {
        nominal
    }
}

/// Look up the Dutch holiday name for a date, if any.
///
/// At most one name is returned per date; checks run in a fixed order and
/// the first match wins.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use klokr::calendar::holidays::holiday_name;
///
/// let easter_2024 = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
/// assert_eq!(holiday_name(easter_2024), Some("Eerste Paasdag"));
/// ```
pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    let (year, month, day) = (date.year(), date.month(), date.day());

    // Fixed dates
    match (month, day) {
        (2, 1) => return Some("Watersnoodramp - 1953"),
        (5, 5) => return Some("Bevrijdingsdag"),
        (12, 25) => return Some("Eerste Kerstdag"),
        (12, 26) => return Some("Tweede Kerstdag"),
        _ => {}
    }

    if date == kings_day(year) {
        return Some("Koningsdag");
    }

    let feasts = MoveableFeasts::for_year(year);
    if date == feasts.good_friday {
        Some("Goede Vrijdag")
    } else if date == feasts.easter_sunday {
        Some("Eerste Paasdag")
    } else if date == feasts.easter_monday {
        Some("Tweede Paasdag")
    } else if date == feasts.ascension_day {
        Some("Hemelvaartsdag")
    } else if date == feasts.pentecost_sunday {
        Some("Eerste Pinksterdag")
    } else if date == feasts.pentecost_monday {
        Some("Tweede Pinksterdag")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_easter_known_years() {
        assert_eq!(easter_sunday(2024), date(2024, 3, 31));
        assert_eq!(easter_sunday(2025), date(2025, 4, 20));
        assert_eq!(easter_sunday(2026), date(2026, 4, 5));
        // Earliest and latest possible Easter in recent memory
        assert_eq!(easter_sunday(2008), date(2008, 3, 23));
        assert_eq!(easter_sunday(2038), date(2038, 4, 25));
    }

    #[test]
    fn test_easter_derived_feasts_2024() {
        let feasts = MoveableFeasts::for_year(2024);
        assert_eq!(feasts.good_friday, date(2024, 3, 29));
        assert_eq!(feasts.easter_monday, date(2024, 4, 1));
        assert_eq!(feasts.ascension_day, date(2024, 5, 9));
        assert_eq!(feasts.pentecost_sunday, date(2024, 5, 19));
        assert_eq!(feasts.pentecost_monday, date(2024, 5, 20));
    }

    #[test]
    fn test_easter_holidays_by_name() {
        assert_eq!(holiday_name(date(2024, 3, 29)), Some("Goede Vrijdag"));
        assert_eq!(holiday_name(date(2024, 3, 31)), Some("Eerste Paasdag"));
        assert_eq!(holiday_name(date(2024, 4, 1)), Some("Tweede Paasdag"));
        assert_eq!(holiday_name(date(2024, 5, 9)), Some("Hemelvaartsdag"));
        assert_eq!(holiday_name(date(2024, 5, 19)), Some("Eerste Pinksterdag"));
        assert_eq!(holiday_name(date(2024, 5, 20)), Some("Tweede Pinksterdag"));
    }

    #[test]
    fn test_fixed_holidays() {
        assert_eq!(holiday_name(date(2024, 2, 1)), Some("Watersnoodramp - 1953"));
        assert_eq!(holiday_name(date(2024, 5, 5)), Some("Bevrijdingsdag"));
        assert_eq!(holiday_name(date(2024, 12, 25)), Some("Eerste Kerstdag"));
        assert_eq!(holiday_name(date(2024, 12, 26)), Some("Tweede Kerstdag"));
    }

    #[test]
    fn test_kings_day_nominal() {
        // 2024: April 27 is a Saturday, no shift
        assert_eq!(kings_day(2024), date(2024, 4, 27));
        assert_eq!(holiday_name(date(2024, 4, 27)), Some("Koningsdag"));
        assert_eq!(holiday_name(date(2024, 4, 26)), None);
    }

    #[test]
    fn test_kings_day_sunday_shift() {
        // 2025: April 27 is a Sunday, observed on the 26th
        assert_eq!(kings_day(2025), date(2025, 4, 26));
        assert_eq!(holiday_name(date(2025, 4, 26)), Some("Koningsdag"));
        assert_eq!(holiday_name(date(2025, 4, 27)), None);
    }

    #[test]
    fn test_ordinary_day_is_no_holiday() {
        assert_eq!(holiday_name(date(2024, 7, 15)), None);
        assert_eq!(holiday_name(date(2024, 11, 3)), None);
    }

    #[test]
    fn test_pure_over_repeated_calls() {
        let d = date(2024, 3, 31);
        assert_eq!(holiday_name(d), holiday_name(d));
    }
}
