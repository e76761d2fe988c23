//! Holiday calendar for the tracked year.
//!
//! The holiday list is configuration data, not derived: fixed national
//! holidays plus one regional patron saint day. Weekend detection is purely
//! calendrical (Saturday/Sunday).

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::day::DayType;

/// The fixed holiday list for one tracked year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    year: i32,
    holidays: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Builds a calendar from an explicit holiday list.
    ///
    /// Dates outside `year` are dropped with a warning; they can never match
    /// a day of the tracked year.
    #[must_use]
    pub fn new(year: i32, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        let holidays = holidays
            .into_iter()
            .filter(|date| {
                if date.year() == year {
                    true
                } else {
                    tracing::warn!(%date, year, "ignoring holiday outside the tracked year");
                    false
                }
            })
            .collect();
        Self { year, holidays }
    }

    /// Italian national holidays for 2025 plus the Palermo patron saint day.
    #[must_use]
    pub fn italy_2025() -> Self {
        let dates = [
            (1, 1),   // Capodanno
            (1, 6),   // Epifania
            (4, 21),  // Lunedì dell'Angelo
            (4, 25),  // Festa della Liberazione
            (5, 1),   // Festa dei Lavoratori
            (6, 2),   // Festa della Repubblica
            (7, 15),  // Santo Patrono di Palermo
            (8, 15),  // Assunzione
            (11, 1),  // Tutti i Santi
            (12, 8),  // Immacolata Concezione
            (12, 25), // Natale
            (12, 26), // Santo Stefano
        ];
        let holidays = dates
            .into_iter()
            .map(|(month, day)| {
                NaiveDate::from_ymd_opt(2025, month, day).expect("valid holiday date")
            })
            .collect();
        Self {
            year: 2025,
            holidays,
        }
    }

    /// The tracked year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The configured holiday dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.holidays.iter().copied()
    }

    /// True iff `date` matches one of the configured holiday dates.
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// True for Saturday and Sunday.
    #[must_use]
    pub fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// A working day is neither a weekend day nor a holiday, regardless of
    /// its classification.
    #[must_use]
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !Self::is_weekend(date) && !self.is_holiday(date)
    }

    /// The default classification a freshly generated day receives.
    #[must_use]
    pub fn default_day_type(&self, date: NaiveDate) -> DayType {
        if self.is_working_day(date) {
            DayType::None
        } else {
            DayType::Festivo
        }
    }

    /// All dates of `month` (1-based) in the tracked year, ascending.
    ///
    /// Returns an empty vector for an out-of-range month.
    #[must_use]
    pub fn month_dates(&self, month: u32) -> Vec<NaiveDate> {
        let Some(first) = NaiveDate::from_ymd_opt(self.year, month, 1) else {
            tracing::warn!(month, "month out of range");
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|date| date.month() == month)
            .collect()
    }

    /// Number of working days in `month` (1-based), independent of any
    /// stored classification.
    #[must_use]
    pub fn working_days_in_month(&self, month: u32) -> u32 {
        let count = self
            .month_dates(month)
            .into_iter()
            .filter(|date| self.is_working_day(*date))
            .count();
        u32::try_from(count).unwrap_or(0)
    }
}
