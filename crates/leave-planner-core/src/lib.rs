//! Absence planning: day-by-day listings of a leave period, the Monday/Friday
//! schedule that makes up the lost in-office days, and summary reports.

pub mod calendar;
pub mod compensation;
pub mod day;
pub mod error;
pub mod export;
pub mod locale;
pub mod report;
