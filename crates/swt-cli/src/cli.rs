//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Smart-working calendar tracker.
///
/// Classifies each working day of the tracked year (home, on-site, leave,
/// sickness) and reports monthly and yearly utilization.
#[derive(Debug, Parser)]
#[command(name = "swt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one month of the calendar.
    Month {
        /// Month number, 1-12.
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },

    /// Classify a day.
    Set {
        /// The date to classify (YYYY-MM-DD).
        date: String,

        /// The day type: casa, azienda, par, ferie, malattia or none.
        day_type: String,

        /// Hours attributed to the primary type (PAR/FERIE only; defaults
        /// to the type's standard hours).
        #[arg(long)]
        hours: Option<u8>,

        /// Secondary type covering the remaining hours of a partial day.
        #[arg(long)]
        secondary: Option<String>,
    },

    /// Show monthly/yearly totals and utilization.
    Report {
        /// Restrict the report to one month (1-12).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Emit machine-readable JSON instead of the table.
        #[arg(long)]
        json: bool,
    },

    /// List the configured holiday dates.
    Holidays,

    /// Show where the calendar lives and how much of it is classified.
    Status,
}
