//! Month command: one month of the calendar, day by day.

use std::io::Write;

use anyhow::{Result, anyhow};
use chrono::Datelike;
use swt_store::{BlobStore, CalendarStore};

use super::util::day_label;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    store: &mut CalendarStore<B>,
    month: u32,
) -> Result<()> {
    let name = month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .ok_or_else(|| anyhow!("month must be between 1 and 12, got {month}"))?;
    let days = store.generate_month(month);
    writeln!(writer, "{name} {}", store.year())?;

    for day in &days {
        writeln!(
            writer,
            "{}  {}  {}",
            day.date.format("%Y-%m-%d"),
            day.date.weekday(),
            day_label(day)
        )?;
    }

    let working = store.calendar().working_days_in_month(month);
    let classified = days
        .iter()
        .filter(|day| day.is_classified() && !day.is_festivo())
        .count();
    writeln!(writer)?;
    writeln!(
        writer,
        "{classified} of {working} working days classified"
    )?;

    Ok(())
}
