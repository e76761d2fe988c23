//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use swt_core::HolidayCalendar;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// The tracked year.
    pub year: i32,

    /// Holiday dates for the tracked year (ISO dates).
    pub holidays: Vec<NaiveDate>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("year", &self.year)
            .field("holidays", &self.holidays.len())
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        let calendar = HolidayCalendar::italy_2025();
        Self {
            database_path: data_dir.join("swt.db"),
            year: calendar.year(),
            holidays: calendar.dates().collect(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SWT_*)
        figment = figment.merge(Env::prefixed("SWT_"));

        figment.extract()
    }

    /// Builds the holiday calendar from the configured year and dates.
    #[must_use]
    pub fn holiday_calendar(&self) -> HolidayCalendar {
        HolidayCalendar::new(self.year, self.holidays.iter().copied())
    }
}

/// Returns the platform-specific config directory for swt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("swt"))
}

/// Returns the platform-specific data directory for swt.
///
/// On Linux: `~/.local/share/swt`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("swt"))
}
