//! Aggregation engine: monthly and yearly utilization totals.
//!
//! Scans classified days and rolls them up per month. Presence (CASA and
//! AZIENDA) is counted in whole days from *both* the primary and the
//! secondary field; leave (PAR and FERIE) is counted in hours, taking the
//! complement `8 - hours` when the leave type sits in the secondary slot.
//! A mixed day therefore contributes to one whole-day bucket and one hour
//! bucket at the same time, which is why utilization is clamped to the
//! number of physical working days.

use serde::Serialize;

use crate::day::{CalendarDay, DayType, FULL_DAY_HOURS};
use crate::holidays::HolidayCalendar;

/// Totals for a single month of the tracked year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    /// Month number, 1-based (January = 1).
    pub month: u32,
    pub casa_days: u32,
    pub azienda_days: u32,
    pub par_hours: u32,
    pub ferie_hours: u32,
    pub malattia_days: u32,
    /// Days in the month that are neither weekend nor holiday, independent
    /// of classification.
    pub working_days: u32,
    /// Percentage of working days accounted for, clamped to 100.
    pub utilization: u8,
}

/// Yearly totals: the sum of the twelve monthly summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub casa_days: u32,
    pub azienda_days: u32,
    pub par_hours: u32,
    pub ferie_hours: u32,
    pub malattia_days: u32,
    pub working_days: u32,
    pub utilization: u8,
    pub monthly: Vec<MonthlySummary>,
}

/// Computes the utilization percentage.
///
/// `raw = casa + azienda + par/8 + ferie/8 + malattia` day-equivalents,
/// clamped to `working_days` so double-counted mixed days cannot push the
/// percentage past 100. Returns 0 when there are no working days.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0..=100 before the cast"
)]
#[must_use]
pub fn utilization(
    casa_days: u32,
    azienda_days: u32,
    par_hours: u32,
    ferie_hours: u32,
    malattia_days: u32,
    working_days: u32,
) -> u8 {
    if working_days == 0 {
        return 0;
    }
    let whole_days = f64::from(casa_days + azienda_days + malattia_days);
    let leave_days = f64::from(par_hours + ferie_hours) / f64::from(FULL_DAY_HOURS);
    let raw_total = whole_days + leave_days;
    let capped = raw_total.min(f64::from(working_days));
    (capped / f64::from(working_days) * 100.0).round() as u8
}

/// Rolls the classified day set up into monthly and yearly totals.
///
/// Days outside the calendar's year and FESTIVO (weekend/holiday) days are
/// ignored. Working-day counts come from the holiday calendar alone, so an
/// entirely unclassified month still reports its working days.
#[must_use]
pub fn summarize_year(days: &[CalendarDay], calendar: &HolidayCalendar) -> YearSummary {
    use chrono::Datelike;

    let mut monthly = Vec::with_capacity(12);
    for month in 1..=12 {
        let in_month: Vec<&CalendarDay> = days
            .iter()
            .filter(|day| {
                day.date.year() == calendar.year()
                    && day.date.month() == month
                    && !day.is_festivo()
            })
            .collect();

        let count = |field: fn(&CalendarDay) -> Option<DayType>, wanted: DayType| -> u32 {
            let n = in_month
                .iter()
                .filter(|day| field(day) == Some(wanted))
                .count();
            u32::try_from(n).unwrap_or(u32::MAX)
        };

        let casa_days =
            count(|d| Some(d.day_type), DayType::Casa) + count(|d| d.secondary, DayType::Casa);
        let azienda_days = count(|d| Some(d.day_type), DayType::Azienda)
            + count(|d| d.secondary, DayType::Azienda);
        let par_hours = leave_hours(&in_month, DayType::Par);
        let ferie_hours = leave_hours(&in_month, DayType::Ferie);
        let malattia_days = count(|d| Some(d.day_type), DayType::Malattia);
        let working_days = calendar.working_days_in_month(month);

        monthly.push(MonthlySummary {
            month,
            casa_days,
            azienda_days,
            par_hours,
            ferie_hours,
            malattia_days,
            working_days,
            utilization: utilization(
                casa_days,
                azienda_days,
                par_hours,
                ferie_hours,
                malattia_days,
                working_days,
            ),
        });
    }

    let sum = |field: fn(&MonthlySummary) -> u32| -> u32 { monthly.iter().map(field).sum() };
    let casa_days = sum(|m| m.casa_days);
    let azienda_days = sum(|m| m.azienda_days);
    let par_hours = sum(|m| m.par_hours);
    let ferie_hours = sum(|m| m.ferie_hours);
    let malattia_days = sum(|m| m.malattia_days);
    let working_days = sum(|m| m.working_days);

    YearSummary {
        year: calendar.year(),
        casa_days,
        azienda_days,
        par_hours,
        ferie_hours,
        malattia_days,
        working_days,
        utilization: utilization(
            casa_days,
            azienda_days,
            par_hours,
            ferie_hours,
            malattia_days,
            working_days,
        ),
        monthly,
    }
}

/// Hours of `leave` in the given days: the stored hour count where `leave`
/// is the primary type, plus the complement up to a full day where it is
/// the secondary of some other primary.
fn leave_hours(days: &[&CalendarDay], leave: DayType) -> u32 {
    let primary: u32 = days
        .iter()
        .filter(|day| day.day_type == leave)
        .map(|day| u32::from(day.hours.unwrap_or(0)))
        .sum();
    let secondary: u32 = days
        .iter()
        .filter(|day| day.secondary == Some(leave) && day.day_type != leave)
        .map(|day| {
            let used = day.hours.unwrap_or(0).min(FULL_DAY_HOURS);
            u32::from(FULL_DAY_HOURS - used)
        })
        .sum();
    primary + secondary
}
