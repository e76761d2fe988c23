//! Shared formatting helpers for the calendar commands.

use swt_core::{CalendarDay, DayType, FULL_DAY_HOURS};

/// One-line human label for a day's classification.
///
/// Mixed days show both halves of the split; the hour count is the one
/// stored on the record (the leave type's hours).
pub(crate) fn day_label(day: &CalendarDay) -> String {
    if day.is_festivo() {
        let reason = if day.is_holiday { "holiday" } else { "weekend" };
        return format!("FESTIVO ({reason})");
    }

    match (day.day_type, day.secondary, day.hours) {
        (DayType::None, _, _) => "-".to_string(),
        (day_type, Some(secondary), Some(hours)) => {
            let complement = FULL_DAY_HOURS.saturating_sub(hours);
            format!("{day_type} {complement}h + {secondary} {hours}h")
        }
        (day_type, None, Some(hours)) => format!("{day_type} {hours}h"),
        (day_type, _, None) => day_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(day_type: DayType, secondary: Option<DayType>, hours: Option<u8>) -> CalendarDay {
        CalendarDay {
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            day_type,
            secondary,
            hours,
            is_weekend: false,
            is_holiday: false,
        }
    }

    #[test]
    fn labels() {
        assert_eq!(day_label(&day(DayType::None, None, None)), "-");
        assert_eq!(day_label(&day(DayType::Casa, None, None)), "CASA");
        assert_eq!(day_label(&day(DayType::Ferie, None, Some(8))), "FERIE 8h");
        assert_eq!(
            day_label(&day(DayType::Casa, Some(DayType::Par), Some(4))),
            "CASA 4h + PAR 4h"
        );
        assert_eq!(
            day_label(&day(DayType::Azienda, Some(DayType::Ferie), Some(6))),
            "AZIENDA 2h + FERIE 6h"
        );
    }

    #[test]
    fn festivo_labels() {
        let mut weekend = day(DayType::Festivo, None, None);
        weekend.is_weekend = true;
        assert_eq!(day_label(&weekend), "FESTIVO (weekend)");

        let mut holiday = day(DayType::Festivo, None, None);
        holiday.is_holiday = true;
        assert_eq!(day_label(&holiday), "FESTIVO (holiday)");
    }
}
