//! Report command: monthly and yearly totals with utilization.
//!
//! Human output is a twelve-row table (or a single month with `--month`);
//! `--json` emits the summary together with the classified day list, sorted
//! by date, for machine consumption.

use std::io::Write;

use anyhow::{Result, anyhow};
use chrono::Datelike;
use serde::Serialize;
use swt_core::{CalendarDay, MonthlySummary, YearSummary};
use swt_store::{BlobStore, CalendarStore};

/// Machine-readable report payload.
#[derive(Debug, Serialize)]
struct JsonReport<S: Serialize> {
    summary: S,
    days: Vec<CalendarDay>,
}

pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    store: &CalendarStore<B>,
    month: Option<u32>,
    json: bool,
) -> Result<()> {
    let summary = store.summary();
    let days = store.classified_days();

    match (month, json) {
        (None, false) => render_year(writer, &summary)?,
        (Some(month), false) => {
            render_month(writer, store.year(), month_summary(&summary, month)?)?;
        }
        (None, true) => {
            let report = JsonReport { summary, days };
            writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        (Some(month), true) => {
            let report = JsonReport {
                summary: month_summary(&summary, month)?.clone(),
                days: days
                    .into_iter()
                    .filter(|day| day.date.month() == month)
                    .collect(),
            };
            writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}

fn month_summary(summary: &YearSummary, month: u32) -> Result<&MonthlySummary> {
    month
        .checked_sub(1)
        .and_then(|index| summary.monthly.get(index as usize))
        .ok_or_else(|| anyhow!("month must be between 1 and 12, got {month}"))
}

fn render_year<W: Write>(writer: &mut W, summary: &YearSummary) -> Result<()> {
    writeln!(writer, "Year {}", summary.year)?;
    writeln!(
        writer,
        "{:<5} {:>5} {:>8} {:>7} {:>9} {:>9} {:>8} {:>5}",
        "Month", "CASA", "AZIENDA", "PAR h", "FERIE h", "MALATTIA", "Working", "Util"
    )?;
    for month in &summary.monthly {
        write_row(writer, &month_abbrev(month.month), month)?;
    }
    writeln!(
        writer,
        "{:<5} {:>5} {:>8} {:>7} {:>9} {:>9} {:>8} {:>4}%",
        "Total",
        summary.casa_days,
        summary.azienda_days,
        summary.par_hours,
        summary.ferie_hours,
        summary.malattia_days,
        summary.working_days,
        summary.utilization
    )?;
    Ok(())
}

fn render_month<W: Write>(writer: &mut W, year: i32, month: &MonthlySummary) -> Result<()> {
    writeln!(writer, "{} {year}", month_abbrev(month.month))?;
    writeln!(writer, "CASA days:     {}", month.casa_days)?;
    writeln!(writer, "AZIENDA days:  {}", month.azienda_days)?;
    writeln!(writer, "PAR hours:     {}", month.par_hours)?;
    writeln!(writer, "FERIE hours:   {}", month.ferie_hours)?;
    writeln!(writer, "MALATTIA days: {}", month.malattia_days)?;
    writeln!(writer, "Working days:  {}", month.working_days)?;
    writeln!(writer, "Utilization:   {}%", month.utilization)?;
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, label: &str, month: &MonthlySummary) -> Result<()> {
    writeln!(
        writer,
        "{label:<5} {:>5} {:>8} {:>7} {:>9} {:>9} {:>8} {:>4}%",
        month.casa_days,
        month.azienda_days,
        month.par_hours,
        month.ferie_hours,
        month.malattia_days,
        month.working_days,
        month.utilization
    )?;
    Ok(())
}

fn month_abbrev(month: u32) -> String {
    const ABBREV: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    ABBREV[month as usize - 1].to_string()
}
