//! Set command: classify one day of the calendar.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use swt_core::{ClassificationRequest, DayType};
use swt_store::{BlobStore, CalendarStore, StoreError};

use super::util::day_label;

pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    store: &mut CalendarStore<B>,
    date: &str,
    day_type: &str,
    hours: Option<u8>,
    secondary: Option<&str>,
) -> Result<()> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{date}', expected YYYY-MM-DD"))?;
    let day_type: DayType = day_type.parse()?;
    let secondary = secondary.map(str::parse::<DayType>).transpose()?;

    let request = ClassificationRequest {
        day_type,
        hours: hours.or(day_type.policy().default_hours),
        secondary,
    };

    let stored = match store.classify(date, request) {
        Ok(stored) => stored,
        Err(error @ (StoreError::Rule(_) | StoreError::FestivoDate { .. })) => {
            bail!("{error}")
        }
        Err(error @ StoreError::OutsideYear { .. }) => {
            bail!("{error}; adjust `year` in the config to track a different year")
        }
    };

    writeln!(
        writer,
        "{}  {}",
        stored.date.format("%Y-%m-%d"),
        day_label(&stored)
    )?;
    Ok(())
}
