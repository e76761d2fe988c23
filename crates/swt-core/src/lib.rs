//! Core domain logic for the smart-working calendar.
//!
//! This crate contains the fundamental types and logic for:
//! - Day classification: the rule engine that validates and normalizes a
//!   proposed `(type, hours, secondary)` triple
//! - Holiday calendar: weekend/holiday queries for the tracked year
//! - Aggregation: monthly and yearly totals plus the utilization metric

pub mod day;
pub mod holidays;
pub mod rules;
pub mod summary;

pub use day::{CalendarDay, DayPolicy, DayType, FULL_DAY_HOURS, UnknownDayType};
pub use holidays::HolidayCalendar;
pub use rules::{Classification, ClassificationRequest, RuleError, classify};
pub use summary::{MonthlySummary, YearSummary, summarize_year, utilization};
