use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{self, DateRange};
use crate::compensation::{self, CompensationResult};
use crate::error::PlannerError;
use crate::locale::Locale;

/// Reference month length for the impact percentage.
const REFERENCE_MONTH_DAYS: u32 = 30;

/// Above this many work days an absence is flagged as long.
const LONG_ABSENCE_WORK_DAYS: u32 = 10;

/// Above this many estimated months a compensation period is flagged as long.
const LONG_COMPENSATION_MONTHS: u32 = 3;

/// Which view of the absence a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    Calendar,
    Compensation,
}

impl FromStr for ReportMode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "calendar" => Ok(ReportMode::Calendar),
            "compensation" => Ok(ReportMode::Compensation),
            other => Err(PlannerError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportMode::Calendar => f.write_str("calendar"),
            ReportMode::Compensation => f.write_str("compensation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_days: u32,
    pub work_days: u32,
    pub weekend_days: u32,
    pub impact_percentage: u32,
}

/// The rule that produced an insight, with the figures it was based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "rule",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum InsightKind {
    PeriodSummary {
        total_days: u32,
        work_days: u32,
        weekend_days: u32,
    },
    LongAbsence {
        work_days: u32,
    },
    OptimizedPeriod {
        work_days: u32,
        weekend_days: u32,
    },
    TemporalAnalysis {
        start: NaiveDate,
        end: NaiveDate,
        weeks: u32,
    },
    CompensationSummary {
        presential_days_lost: u32,
        estimated_months: u32,
    },
    LongCompensation {
        estimated_months: u32,
    },
    ScheduleDistribution {
        weeks: u32,
    },
    CompensationWindow {
        first: NaiveDate,
        last: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

impl Insight {
    pub fn new(kind: InsightKind, locale: &dyn Locale) -> Self {
        let (title, description) = locale.insight_text(&kind);
        Self {
            kind,
            title,
            description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDistribution {
    pub work_days: u32,
    pub weekend_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub day_distribution: DayDistribution,
    /// Days per weekday, Sunday first.
    pub weekly_pattern: [u32; 7],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub summary: ReportSummary,
    pub insights: Vec<Insight>,
    pub analytics: Analytics,
}

/// `round(total_days / 30 * 100)`, rounding halves up.
pub fn impact_percentage(total_days: u32) -> u32 {
    (total_days * 200 + REFERENCE_MONTH_DAYS) / (2 * REFERENCE_MONTH_DAYS)
}

/// Whole weeks in `total_days`, rounded to nearest.
fn rounded_weeks(total_days: u32) -> u32 {
    (total_days * 2 + 7) / 14
}

pub fn summarize(range: &DateRange) -> ReportSummary {
    let total_days = range.day_count();
    let work_days = calendar::work_days(range);
    ReportSummary {
        total_days,
        work_days,
        weekend_days: total_days - work_days,
        impact_percentage: impact_percentage(total_days),
    }
}

fn period_insights(range: &DateRange, summary: &ReportSummary) -> Vec<InsightKind> {
    let mut kinds = vec![InsightKind::PeriodSummary {
        total_days: summary.total_days,
        work_days: summary.work_days,
        weekend_days: summary.weekend_days,
    }];

    if summary.work_days > LONG_ABSENCE_WORK_DAYS {
        kinds.push(InsightKind::LongAbsence {
            work_days: summary.work_days,
        });
    }

    if summary.weekend_days > summary.work_days {
        kinds.push(InsightKind::OptimizedPeriod {
            work_days: summary.work_days,
            weekend_days: summary.weekend_days,
        });
    }

    kinds.push(InsightKind::TemporalAnalysis {
        start: range.start,
        end: range.end,
        weeks: rounded_weeks(summary.total_days),
    });
    kinds
}

fn compensation_insights(compensation: &CompensationResult) -> Vec<InsightKind> {
    let mut kinds = vec![InsightKind::CompensationSummary {
        presential_days_lost: compensation.presential_days_lost,
        estimated_months: compensation.estimated_months,
    }];

    if compensation.estimated_months > LONG_COMPENSATION_MONTHS {
        kinds.push(InsightKind::LongCompensation {
            estimated_months: compensation.estimated_months,
        });
    }

    kinds.push(InsightKind::ScheduleDistribution {
        weeks: compensation.weeks(),
    });

    if let (Some(first), Some(last)) = (
        compensation.compensation_days.first(),
        compensation.compensation_days.last(),
    ) {
        kinds.push(InsightKind::CompensationWindow {
            first: first.date,
            last: last.date,
        });
    }
    kinds
}

/// Summary, insights and weekday analytics for an absence period.
pub fn build_report(
    mode: ReportMode,
    start: NaiveDate,
    end: NaiveDate,
    locale: &dyn Locale,
) -> ReportData {
    let range = DateRange::new(start, end);
    let summary = summarize(&range);

    let mut kinds = period_insights(&range, &summary);
    if mode == ReportMode::Compensation {
        let compensation = compensation::calculate_compensation(start, end, locale);
        kinds.extend(compensation_insights(&compensation));
    }

    debug!(%mode, %start, %end, insights = kinds.len(), "built report");

    ReportData {
        summary,
        insights: kinds
            .into_iter()
            .map(|kind| Insight::new(kind, locale))
            .collect(),
        analytics: Analytics {
            day_distribution: DayDistribution {
                work_days: summary.work_days,
                weekend_days: summary.weekend_days,
            },
            weekly_pattern: calendar::weekly_pattern(&range),
        },
    }
}
