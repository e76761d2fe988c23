//! Day type enum and the classified calendar day record.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hours in a full working day.
pub const FULL_DAY_HOURS: u8 = 8;

/// Canonical classifications for a calendar day.
///
/// `Festivo` marks weekends and public holidays and is never user-assignable;
/// `None` means the day has not been classified yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    None,
    Casa,
    Azienda,
    Par,
    Ferie,
    Festivo,
    Malattia,
}

/// Policy data associated with a day type.
///
/// A single lookup table instead of branching scattered across call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPolicy {
    /// Hours pre-filled when the type is selected. `None` = the type carries
    /// no hour count at all.
    pub default_hours: Option<u8>,
    /// Whether the stored record carries an `hours` field.
    pub takes_hours: bool,
    /// Whether a partial day of this type may be paired with a secondary
    /// classification.
    pub allows_secondary: bool,
}

impl DayType {
    /// Returns the policy row for this type.
    #[must_use]
    pub const fn policy(self) -> DayPolicy {
        match self {
            Self::Par => DayPolicy {
                default_hours: Some(4),
                takes_hours: true,
                allows_secondary: true,
            },
            Self::Ferie => DayPolicy {
                default_hours: Some(FULL_DAY_HOURS),
                takes_hours: true,
                allows_secondary: true,
            },
            Self::Malattia => DayPolicy {
                default_hours: Some(FULL_DAY_HOURS),
                takes_hours: true,
                allows_secondary: false,
            },
            Self::None | Self::Casa | Self::Azienda | Self::Festivo => DayPolicy {
                default_hours: None,
                takes_hours: false,
                allows_secondary: false,
            },
        }
    }

    /// True for the reduced-hour leave types (PAR and FERIE).
    #[must_use]
    pub const fn is_leave(self) -> bool {
        matches!(self, Self::Par | Self::Ferie)
    }

    /// True for the whole-day presence types (CASA and AZIENDA).
    #[must_use]
    pub const fn is_presence(self) -> bool {
        matches!(self, Self::Casa | Self::Azienda)
    }

    /// String representation used in persisted records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Casa => "CASA",
            Self::Azienda => "AZIENDA",
            Self::Par => "PAR",
            Self::Ferie => "FERIE",
            Self::Festivo => "FESTIVO",
            Self::Malattia => "MALATTIA",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DayType {
    type Err = UnknownDayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "CASA" => Ok(Self::Casa),
            "AZIENDA" => Ok(Self::Azienda),
            "PAR" => Ok(Self::Par),
            "FERIE" => Ok(Self::Ferie),
            "FESTIVO" => Ok(Self::Festivo),
            "MALATTIA" => Ok(Self::Malattia),
            _ => Err(UnknownDayType(s.to_string())),
        }
    }
}

impl Serialize for DayType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown day type strings.
#[derive(Debug, Clone)]
pub struct UnknownDayType(String);

impl fmt::Display for UnknownDayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day type: {}", self.0)
    }
}

impl std::error::Error for UnknownDayType {}

/// One classified entry per calendar date in the tracked year.
///
/// `hours` is meaningful only for PAR, FERIE and MALATTIA and counts the
/// hours attributed to `day_type`; when `secondary` is present the complement
/// up to [`FULL_DAY_HOURS`] is implicitly attributed to it. The weekend and
/// holiday flags are derived once from the date and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub day_type: DayType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<DayType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u8>,
    pub is_weekend: bool,
    pub is_holiday: bool,
}

impl CalendarDay {
    /// Creates an unclassified entry for a plain working date.
    #[must_use]
    pub const fn unclassified(date: NaiveDate) -> Self {
        Self {
            date,
            day_type: DayType::None,
            secondary: None,
            hours: None,
            is_weekend: false,
            is_holiday: false,
        }
    }

    /// True when the day is a weekend or holiday and therefore outside
    /// manual classification.
    #[must_use]
    pub const fn is_festivo(&self) -> bool {
        self.is_weekend || self.is_holiday
    }

    /// True once the user has assigned any classification.
    #[must_use]
    pub fn is_classified(&self) -> bool {
        !matches!(self.day_type, DayType::None | DayType::Festivo)
    }
}
