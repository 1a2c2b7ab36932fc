use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::locale::Locale;

/// A single calendar day of an absence period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    pub weekday_name: String,
    pub formatted_date: String,
}

impl DayRecord {
    pub fn new(date: NaiveDate, locale: &dyn Locale) -> Self {
        Self {
            date,
            weekday_name: locale.weekday_name(date),
            formatted_date: locale.long_date(date),
        }
    }
}

/// Day-by-day listing of a period together with its inclusive length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarResult {
    pub duration: u32,
    pub days: Vec<DayRecord>,
}

/// Every day in `[start, end]`, in chronological order. Empty when `start > end`.
pub fn enumerate_days(start: NaiveDate, end: NaiveDate, locale: &dyn Locale) -> Vec<DayRecord> {
    DateRange::new(start, end)
        .iter()
        .map(|(date, _)| DayRecord::new(date, locale))
        .collect()
}

pub fn generate_calendar(start: NaiveDate, end: NaiveDate, locale: &dyn Locale) -> CalendarResult {
    CalendarResult {
        duration: DateRange::new(start, end).day_count(),
        days: enumerate_days(start, end, locale),
    }
}
