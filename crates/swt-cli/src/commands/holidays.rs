//! Holidays command: list the configured holiday dates.

use std::io::Write;

use anyhow::Result;
use swt_core::HolidayCalendar;

pub fn run<W: Write>(writer: &mut W, calendar: &HolidayCalendar) -> Result<()> {
    writeln!(writer, "Holidays for {}", calendar.year())?;
    for date in calendar.dates() {
        writeln!(writer, "{}  {}", date.format("%Y-%m-%d"), date.format("%A"))?;
    }
    Ok(())
}
