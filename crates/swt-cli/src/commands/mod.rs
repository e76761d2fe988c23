//! CLI subcommand implementations.

pub mod holidays;
pub mod month;
pub mod report;
pub mod set;
pub mod status;
mod util;
