use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{self, DateRange};
use crate::locale::Locale;

/// A future Monday or Friday assigned to make up a lost presential day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationDay {
    pub date: NaiveDate,
    /// 1-based pair index: two consecutive compensation days share a week number.
    pub week_number: u32,
    pub weekday_name: String,
    pub formatted_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationResult {
    pub total_days: u32,
    pub presential_days_lost: u32,
    pub compensation_days: Vec<CompensationDay>,
    pub total_compensation_days: u32,
    pub estimated_months: u32,
}

impl CompensationResult {
    /// Number of compensation weeks, two days per week.
    pub fn weeks(&self) -> u32 {
        compensation_weeks(self.total_compensation_days)
    }
}

/// Count Tuesdays, Wednesdays and Thursdays in `[start, end]`.
pub fn count_presential_loss(start: NaiveDate, end: NaiveDate) -> u32 {
    DateRange::new(start, end).count_where(calendar::is_presential)
}

/// Pick the first `lost_count` Mondays/Fridays strictly after `end`.
pub fn schedule_compensation(
    end: NaiveDate,
    lost_count: u32,
    locale: &dyn Locale,
) -> Vec<CompensationDay> {
    if lost_count == 0 {
        return Vec::new();
    }
    let Some(first) = end.succ_opt() else {
        return Vec::new();
    };

    let days: Vec<CompensationDay> = calendar::days_from(first)
        .filter(|(_, weekday)| calendar::is_compensation_eligible(*weekday))
        .take(lost_count as usize)
        .enumerate()
        .map(|(index, (date, _))| CompensationDay {
            date,
            week_number: index as u32 / 2 + 1,
            weekday_name: locale.weekday_name(date),
            formatted_date: locale.long_date(date),
        })
        .collect();

    debug!(
        lost_count,
        first = ?days.first().map(|d| d.date),
        last = ?days.last().map(|d| d.date),
        "scheduled compensation days"
    );
    days
}

pub fn compensation_weeks(total_compensation_days: u32) -> u32 {
    total_compensation_days.div_ceil(2)
}

/// Months needed to make up `total_compensation_days`, counting four weeks per month.
pub fn estimated_months(total_compensation_days: u32) -> u32 {
    compensation_weeks(total_compensation_days).div_ceil(4)
}

pub fn calculate_compensation(
    start: NaiveDate,
    end: NaiveDate,
    locale: &dyn Locale,
) -> CompensationResult {
    let presential_days_lost = count_presential_loss(start, end);
    let compensation_days = schedule_compensation(end, presential_days_lost, locale);
    let total_compensation_days = compensation_days.len() as u32;

    CompensationResult {
        total_days: DateRange::new(start, end).day_count(),
        presential_days_lost,
        compensation_days,
        total_compensation_days,
        estimated_months: estimated_months(total_compensation_days),
    }
}
