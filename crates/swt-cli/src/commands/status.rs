//! Status command: where the calendar lives and how much is classified.

use std::io::Write;

use anyhow::Result;
use swt_store::{BlobStore, CalendarStore};

use crate::Config;

pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    config: &Config,
    store: &CalendarStore<B>,
) -> Result<()> {
    let summary = store.summary();
    let classified = store.classified_days().len();

    writeln!(writer, "Smart-working calendar status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(writer, "Year: {}", store.year())?;
    writeln!(
        writer,
        "Classified days: {classified} of {} working days",
        summary.working_days
    )?;
    writeln!(writer, "Utilization: {}%", summary.utilization)?;

    Ok(())
}
