//! Calendar day store for the smart-working calendar.
//!
//! The [`CalendarStore`] exclusively owns the in-memory day map for one
//! tracked year. Days are generated lazily per month, mutated only through
//! rule-engine-normalized input, and persisted as a single JSON blob after
//! every write. External collaborators receive owned copies, never
//! references into the map.
//!
//! # Failure model
//!
//! Persistence failures never surface to callers: a corrupt or unreadable
//! blob loads as an empty calendar, and a failed save clears the stale blob
//! and keeps serving from memory. The only caller-visible errors are
//! classification rejections.
//!
//! # Thread safety
//!
//! The store is a single-writer, in-process object. Subscribers observe
//! writes through a broadcast channel that fires only after a successful
//! persist.

mod blob;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tokio::sync::broadcast;

use swt_core::{
    CalendarDay, Classification, ClassificationRequest, HolidayCalendar, RuleError, YearSummary,
};

pub use blob::{BlobError, BlobStore, MemoryBlob, SqliteBlob};

/// Capacity of the change-notification channel. Subscribers that lag
/// simply re-fetch, so a small buffer is enough.
const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Errors surfaced by store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The proposed classification was rejected by the rule engine.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Weekends and holidays are fixed FESTIVO days.
    #[error("{date} is a weekend or holiday and cannot be classified")]
    FestivoDate { date: NaiveDate },

    /// The date does not belong to the tracked year.
    #[error("{date} is outside the tracked year {year}")]
    OutsideYear { date: NaiveDate, year: i32 },
}

/// The in-memory calendar for one tracked year, backed by a blob store.
pub struct CalendarStore<B> {
    backend: B,
    calendar: HolidayCalendar,
    key: String,
    days: BTreeMap<NaiveDate, CalendarDay>,
    updates: broadcast::Sender<bool>,
}

impl<B: BlobStore> CalendarStore<B> {
    /// Opens the store, loading any previously persisted calendar.
    ///
    /// A missing, unreadable or malformed blob falls back to an empty day
    /// set; initialization itself never fails on bad data.
    pub fn open(backend: B, calendar: HolidayCalendar) -> Self {
        let key = format!("smart-working-{}", calendar.year());
        let days = load_days(&backend, &key);
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            backend,
            calendar,
            key,
            days,
            updates,
        }
    }

    /// The tracked year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.calendar.year()
    }

    /// The holiday calendar in use.
    #[must_use]
    pub const fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// True iff `date` is on the configured holiday list.
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.calendar.is_holiday(date)
    }

    /// Registers a change observer. A `true` is broadcast after every
    /// successful persist; subscribers re-fetch rather than receiving a
    /// payload.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<bool> {
        self.updates.subscribe()
    }

    /// Returns every day of `month` (1-based) in ascending order, creating
    /// default entries for dates seen for the first time.
    ///
    /// Defaults are FESTIVO on weekends/holidays and NONE otherwise.
    /// Already-classified days are never overwritten, and generation does
    /// not persist.
    pub fn generate_month(&mut self, month: u32) -> Vec<CalendarDay> {
        self.calendar
            .month_dates(month)
            .into_iter()
            .map(|date| {
                self.days
                    .entry(date)
                    .or_insert_with(|| default_day(&self.calendar, date))
                    .clone()
            })
            .collect()
    }

    /// Looks up a single day by date.
    #[must_use]
    pub fn get_day(&self, date: NaiveDate) -> Option<CalendarDay> {
        self.days.get(&date).cloned()
    }

    /// Every stored entry, in ascending date order.
    #[must_use]
    pub fn all_days(&self) -> Vec<CalendarDay> {
        self.days.values().cloned().collect()
    }

    /// The export view: classified, non-FESTIVO days sorted by date.
    #[must_use]
    pub fn classified_days(&self) -> Vec<CalendarDay> {
        self.days
            .values()
            .filter(|day| day.is_classified() && !day.is_festivo())
            .cloned()
            .collect()
    }

    /// Validates and applies a classification to `date`.
    ///
    /// Weekend/holiday dates and dates outside the tracked year are
    /// refused before the rule engine runs; a rule rejection leaves the
    /// store untouched. On success the normalized day is persisted and
    /// returned.
    pub fn classify(
        &mut self,
        date: NaiveDate,
        request: ClassificationRequest,
    ) -> Result<CalendarDay, StoreError> {
        if date.year() != self.year() {
            return Err(StoreError::OutsideYear {
                date,
                year: self.year(),
            });
        }
        if !self.calendar.is_working_day(date) {
            return Err(StoreError::FestivoDate { date });
        }

        let Classification {
            day_type,
            secondary,
            hours,
        } = swt_core::classify(request)?;

        let day = CalendarDay {
            date,
            day_type,
            secondary,
            hours,
            // Derived in upsert; caller-supplied flags are never trusted.
            is_weekend: false,
            is_holiday: false,
        };
        Ok(self.upsert(day))
    }

    /// Inserts or replaces the entry for `day.date` and persists the map.
    ///
    /// Expects rule-engine-normalized input. The weekend/holiday flags are
    /// derived from the date on first insert and preserved verbatim on
    /// update; the caller's flags are ignored either way. Returns the
    /// stored value.
    pub fn upsert(&mut self, mut day: CalendarDay) -> CalendarDay {
        match self.days.get(&day.date) {
            Some(existing) => {
                day.is_weekend = existing.is_weekend;
                day.is_holiday = existing.is_holiday;
            }
            None => {
                day.is_weekend = HolidayCalendar::is_weekend(day.date);
                day.is_holiday = self.calendar.is_holiday(day.date);
            }
        }
        tracing::debug!(date = %day.date, day_type = %day.day_type, "day updated");
        let stored = day.clone();
        self.days.insert(day.date, day);
        if self.persist() {
            let _ = self.updates.send(true);
        }
        stored
    }

    /// Monthly and yearly totals over the current day set.
    #[must_use]
    pub fn summary(&self) -> YearSummary {
        let days = self.all_days();
        swt_core::summarize_year(&days, &self.calendar)
    }

    /// Writes the full map to the backend. On failure the stale blob is
    /// cleared so a partial write can never be read back; the in-memory
    /// state keeps serving either way.
    fn persist(&mut self) -> bool {
        let serializable: BTreeMap<String, &CalendarDay> = self
            .days
            .iter()
            .map(|(date, day)| (day_key(*date), day))
            .collect();
        let payload = match serde_json::to_string(&serializable) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::error!(%error, "failed to serialize calendar");
                return false;
            }
        };

        match self.backend.save(&self.key, &payload) {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(%error, "failed to save calendar, clearing stale blob");
                if let Err(clear_error) = self.backend.clear(&self.key) {
                    tracing::error!(%clear_error, "failed to clear calendar blob");
                }
                false
            }
        }
    }
}

/// Deterministic per-day identifier used as the JSON map key.
fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Builds the default entry for a never-classified date.
fn default_day(calendar: &HolidayCalendar, date: NaiveDate) -> CalendarDay {
    CalendarDay {
        date,
        day_type: calendar.default_day_type(date),
        secondary: None,
        hours: None,
        is_weekend: HolidayCalendar::is_weekend(date),
        is_holiday: calendar.is_holiday(date),
    }
}

/// Loads and decodes the persisted day map, falling back to empty on any
/// failure.
fn load_days<B: BlobStore>(backend: &B, key: &str) -> BTreeMap<NaiveDate, CalendarDay> {
    let payload = match backend.load(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            tracing::debug!(key, "no saved calendar found");
            return BTreeMap::new();
        }
        Err(error) => {
            tracing::error!(%error, "failed to load calendar, starting empty");
            return BTreeMap::new();
        }
    };

    match serde_json::from_str::<BTreeMap<String, CalendarDay>>(&payload) {
        Ok(parsed) => {
            tracing::debug!(days = parsed.len(), "calendar loaded");
            // Re-key by the record's own date; the map key is only an address.
            parsed.into_values().map(|day| (day.date, day)).collect()
        }
        Err(error) => {
            tracing::error!(%error, "corrupt calendar blob, starting empty");
            BTreeMap::new()
        }
    }
}
