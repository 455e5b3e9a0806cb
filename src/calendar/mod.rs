//! Calendar facts: holidays and DST transitions, computed once per day.
//!
//! The holiday and DST detectors are pure functions over (year, month,
//! day), but Easter arithmetic is wasteful to repeat sixty times a minute,
//! so the dashboard asks a [`DayFactCache`] which recomputes only when the
//! calendar day rolls over.

pub mod dst;
pub mod holidays;

use chrono::NaiveDate;

use dst::DstTransition;

/// Everything the dashboard wants to know about one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFact {
    pub date: NaiveDate,
    pub holiday_name: Option<&'static str>,
    pub dst_transition: Option<DstTransition>,
    pub summer_time: bool,
}

impl CalendarFact {
    /// Derive the facts for one date. Pure; same date, same facts.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            holiday_name: holidays::holiday_name(date),
            dst_transition: dst::transition_week(date),
            summer_time: dst::is_summer_time(date),
        }
    }

    /// The DST notice for this day, if it falls in a transition week.
    pub fn dst_message(&self) -> Option<&'static str> {
        self.dst_transition.map(dst::message_for)
    }
}

/// Memoizes the current day's [`CalendarFact`] keyed on the date.
#[derive(Debug, Default)]
pub struct DayFactCache {
    current: Option<CalendarFact>,
}

impl DayFactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The facts for `date`, recomputed only when the day changes.
    pub fn fact_for(&mut self, date: NaiveDate) -> CalendarFact {
        match self.current {
            Some(fact) if fact.date == date => fact,
            _ => {
                let fact = CalendarFact::for_date(date);
                self.current = Some(fact);
                fact
            }
        }
    }
}
