use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Inclusive range of calendar days `[start, end]`.
///
/// Iterating yields `(date, weekday)` pairs in chronological order. A range whose
/// `start` is after its `end` yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days in the range, counting both endpoints. Zero when `start > end`.
    pub fn day_count(&self) -> u32 {
        let diff = (self.end - self.start).num_days();
        if diff < 0 { 0 } else { diff as u32 + 1 }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Count the days whose weekday satisfies `pred`.
    pub fn count_where(&self, pred: impl Fn(Weekday) -> bool) -> u32 {
        self.iter().filter(|(_, wd)| pred(*wd)).count() as u32
    }

    pub fn iter(&self) -> DayIter {
        DayIter {
            next: (!self.is_empty()).then_some(self.start),
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = (NaiveDate, Weekday);
    type IntoIter = DayIter;

    fn into_iter(self) -> DayIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = (NaiveDate, Weekday);
    type IntoIter = DayIter;

    fn into_iter(self) -> DayIter {
        self.iter()
    }
}

/// Iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DayIter {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DayIter {
    type Item = (NaiveDate, Weekday);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some((current, current.weekday()))
    }
}

/// Unbounded walk over the days starting at `from` (inclusive).
/// Ends only at the last representable date.
pub fn days_from(from: NaiveDate) -> impl Iterator<Item = (NaiveDate, Weekday)> {
    std::iter::successors(Some(from), |d| d.succ_opt()).map(|d| (d, d.weekday()))
}

/// Tuesday, Wednesday and Thursday are the in-office days.
pub fn is_presential(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Tue | Weekday::Wed | Weekday::Thu)
}

/// Mondays and Fridays are the days available to make up lost presential days.
pub fn is_compensation_eligible(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Mon | Weekday::Fri)
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Number of Monday-Friday days in the range.
pub fn work_days(range: &DateRange) -> u32 {
    range.count_where(|wd| !is_weekend(wd))
}

/// Days per weekday, indexed from Sunday (0) to Saturday (6).
pub fn weekly_pattern(range: &DateRange) -> [u32; 7] {
    let mut pattern = [0u32; 7];
    for (_, weekday) in range {
        pattern[weekday.num_days_from_sunday() as usize] += 1;
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn work_days_skips_weekends() {
        // Mon Jan 13 through Sun Jan 19, 2025
        assert_eq!(work_days(&DateRange::new(date(2025, 1, 13), date(2025, 1, 19))), 5);
        // Two full weeks
        assert_eq!(work_days(&DateRange::new(date(2025, 1, 6), date(2025, 1, 19))), 10);
    }

    #[test]
    fn work_days_single_day_weekend() {
        // Saturday
        assert_eq!(work_days(&DateRange::new(date(2025, 1, 18), date(2025, 1, 18))), 0);
    }

    #[test]
    fn range_yields_every_day_inclusive() {
        let range = DateRange::new(date(2025, 1, 30), date(2025, 2, 2));
        let days: Vec<_> = range.iter().collect();
        assert_eq!(
            days,
            vec![
                (date(2025, 1, 30), Weekday::Thu),
                (date(2025, 1, 31), Weekday::Fri),
                (date(2025, 2, 1), Weekday::Sat),
                (date(2025, 2, 2), Weekday::Sun),
            ]
        );
        assert_eq!(range.day_count(), 4);
    }

    #[test]
    fn range_single_day() {
        let range = DateRange::new(date(2025, 5, 6), date(2025, 5, 6));
        assert_eq!(range.iter().count(), 1);
        assert_eq!(range.day_count(), 1);
    }

    #[test]
    fn range_start_after_end_is_empty() {
        let range = DateRange::new(date(2025, 1, 20), date(2025, 1, 15));
        assert!(range.is_empty());
        assert_eq!(range.iter().count(), 0);
        assert_eq!(range.day_count(), 0);
    }

    #[test]
    fn range_crosses_leap_day() {
        let range = DateRange::new(date(2024, 2, 28), date(2024, 3, 1));
        assert_eq!(range.day_count(), 3);
        assert_eq!(range.iter().nth(1), Some((date(2024, 2, 29), Weekday::Thu)));
    }

    #[test]
    fn range_ending_at_max_date_terminates() {
        let range = DateRange::new(NaiveDate::MAX.pred_opt().unwrap(), NaiveDate::MAX);
        assert_eq!(range.iter().count(), 2);
    }

    #[test]
    fn days_from_includes_first_day() {
        let first: Vec<_> = days_from(date(2025, 5, 13)).take(2).collect();
        assert_eq!(
            first,
            vec![(date(2025, 5, 13), Weekday::Tue), (date(2025, 5, 14), Weekday::Wed)]
        );
    }

    #[test]
    fn weekly_pattern_counts_by_weekday() {
        // Sun Jan 5 through Sat Jan 18, 2025: two of each
        let pattern = weekly_pattern(&DateRange::new(date(2025, 1, 5), date(2025, 1, 18)));
        assert_eq!(pattern, [2; 7]);

        // Tue May 6 through Thu May 8, 2025
        let pattern = weekly_pattern(&DateRange::new(date(2025, 5, 6), date(2025, 5, 8)));
        assert_eq!(pattern, [0, 0, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn weekday_classes() {
        assert!(is_presential(Weekday::Wed));
        assert!(!is_presential(Weekday::Mon));
        assert!(is_compensation_eligible(Weekday::Fri));
        assert!(!is_compensation_eligible(Weekday::Sat));
        assert!(is_weekend(Weekday::Sun));
        assert!(!is_weekend(Weekday::Fri));
    }

    #[test]
    fn count_where_matches_brute_force() {
        let range = DateRange::new(date(2025, 3, 1), date(2025, 3, 31));
        let brute = range.iter().filter(|(_, wd)| is_presential(*wd)).count() as u32;
        assert_eq!(range.count_where(is_presential), brute);
        // March 2025: 4 Tuesdays, 4 Wednesdays, 4 Thursdays
        assert_eq!(brute, 12);
    }
}
