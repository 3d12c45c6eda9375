//! Calendar bucketing and date range helpers
//!
//! Buckets are local calendar intervals: a day, a Sunday-started week, or a
//! month. Each bucket has a sortable key and a display label; ordering is
//! always done on the key.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Expense, Granularity};

/// Midnight at the start of `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable instant of `date`
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.succ_opt()
        .map(|next| start_of_day(next) - Duration::nanoseconds(1))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Saturday on or after `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// First day of the bucket containing `date`
pub fn bucket_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Daily => date,
        Granularity::Weekly => week_start(date),
        Granularity::Monthly => month_start(date),
    }
}

/// Sortable bucket identity: `YYYY-MM-DD` for days and weeks (week start),
/// `YYYY-MM` for months
pub fn bucket_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily | Granularity::Weekly => {
            bucket_start(date, granularity).format("%Y-%m-%d").to_string()
        }
        Granularity::Monthly => date.format("%Y-%m").to_string(),
    }
}

/// Display label for the bucket containing `date`
pub fn bucket_label(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => date.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => format!("Week of {}", week_start(date).format("%b %-d, %Y")),
        Granularity::Monthly => date.format("%b %Y").to_string(),
    }
}

/// Default date formatter used by the chart layer
pub fn format_date_by_granularity(date: NaiveDate, granularity: Granularity) -> String {
    bucket_label(date, granularity)
}

/// Group expenses into buckets keyed by [`bucket_key`]
///
/// Every expense lands in exactly one bucket and keeps its relative input
/// order within that bucket. Keys iterate in chronological order.
pub fn group_by_period(
    expenses: &[Expense],
    granularity: Granularity,
) -> BTreeMap<String, Vec<&Expense>> {
    let mut buckets: BTreeMap<String, Vec<&Expense>> = BTreeMap::new();
    for expense in expenses {
        buckets
            .entry(bucket_key(expense.day(), granularity))
            .or_default()
            .push(expense);
    }
    debug!(
        expenses = expenses.len(),
        buckets = buckets.len(),
        granularity = granularity.as_str(),
        "Grouped expenses by period"
    );
    buckets
}

/// Whether `timestamp` falls within `[start, end]`, with `start` clamped to
/// the start of its day and `end` to the end of its day. `None` leaves that
/// side unbounded.
pub fn is_in_range(
    timestamp: NaiveDateTime,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> bool {
    if let Some(start) = start {
        if timestamp < start_of_day(start) {
            return false;
        }
    }
    if let Some(end) = end {
        if timestamp > end_of_day(end) {
            return false;
        }
    }
    true
}

/// Inclusive, optionally open-ended range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        is_in_range(timestamp, self.start, self.end)
    }
}

/// A named range relative to today
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRangePreset {
    /// CLI name, e.g. "last-30-days"
    pub name: &'static str,
    pub label: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Quick-pick ranges: today, last 7 days, last 30 days, this month, last month
pub fn date_range_presets(today: NaiveDate) -> Vec<DateRangePreset> {
    let last_month_end = month_start(today) - Duration::days(1);
    vec![
        DateRangePreset {
            name: "today",
            label: "Today",
            start: today,
            end: today,
        },
        DateRangePreset {
            name: "last-7-days",
            label: "Last 7 days",
            start: today - Duration::days(6),
            end: today,
        },
        DateRangePreset {
            name: "last-30-days",
            label: "Last 30 days",
            start: today - Duration::days(29),
            end: today,
        },
        DateRangePreset {
            name: "this-month",
            label: "This month",
            start: month_start(today),
            end: month_end(today),
        },
        DateRangePreset {
            name: "last-month",
            label: "Last month",
            start: month_start(last_month_end),
            end: last_month_end,
        },
    ]
}

/// Look up a preset by its CLI name
pub fn resolve_preset(name: &str, today: NaiveDate) -> Option<DateRange> {
    date_range_presets(today)
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .map(|p| DateRange::between(p.start, p.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, ts};
    use crate::models::Category;

    #[test]
    fn test_week_starts_on_sunday() {
        // 2025-11-09 is a Sunday, 2025-11-15 the following Saturday
        let sunday = date(2025, 11, 9);
        let saturday = date(2025, 11, 15);
        assert_eq!(week_start(sunday), sunday);
        assert_eq!(week_start(saturday), sunday);
        assert_eq!(week_end(sunday), saturday);
        assert_eq!(
            bucket_key(sunday, Granularity::Weekly),
            bucket_key(saturday, Granularity::Weekly)
        );
        assert_ne!(
            bucket_key(saturday, Granularity::Weekly),
            bucket_key(date(2025, 11, 16), Granularity::Weekly)
        );
    }

    #[test]
    fn test_bucket_keys_and_labels() {
        let d = date(2025, 11, 12);
        assert_eq!(bucket_key(d, Granularity::Daily), "2025-11-12");
        assert_eq!(bucket_key(d, Granularity::Weekly), "2025-11-09");
        assert_eq!(bucket_key(d, Granularity::Monthly), "2025-11");
        assert_eq!(bucket_label(d, Granularity::Daily), "2025-11-12");
        assert_eq!(bucket_label(d, Granularity::Weekly), "Week of Nov 9, 2025");
        assert_eq!(bucket_label(d, Granularity::Monthly), "Nov 2025");
    }

    #[test]
    fn test_week_crossing_year_boundary() {
        // 2026-01-01 is a Thursday; its week starts on 2025-12-28
        let d = date(2026, 1, 1);
        assert_eq!(bucket_key(d, Granularity::Weekly), "2025-12-28");
        assert_eq!(bucket_start(d, Granularity::Monthly), date(2026, 1, 1));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(month_end(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(month_end(date(2025, 12, 5)), date(2025, 12, 31));
    }

    #[test]
    fn test_group_by_period_partitions_and_keeps_order() {
        let expenses = vec![
            expense("a", 10.0, ts(2025, 11, 12, 9), Category::FoodDining),
            expense("b", 20.0, ts(2025, 10, 3, 9), Category::Travel),
            expense("c", 30.0, ts(2025, 11, 1, 9), Category::Shopping),
            expense("d", 40.0, ts(2025, 11, 30, 23), Category::FoodDining),
        ];

        let groups = group_by_period(&expenses, Granularity::Monthly);
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, vec!["2025-10", "2025-11"]);

        let november: Vec<&str> = groups["2025-11"].iter().map(|e| e.id.as_str()).collect();
        assert_eq!(november, vec!["a", "c", "d"]);

        let total: usize = groups.values().map(|v| v.len()).sum();
        assert_eq!(total, expenses.len());
    }

    #[test]
    fn test_is_in_range_clamps_to_day_boundaries() {
        let start = date(2025, 11, 1);
        let end = date(2025, 11, 30);

        assert!(is_in_range(ts(2025, 11, 1, 0), Some(start), Some(end)));
        assert!(is_in_range(
            date(2025, 11, 30).and_hms_opt(23, 59, 59).unwrap(),
            Some(start),
            Some(end)
        ));
        assert!(!is_in_range(ts(2025, 12, 1, 0), Some(start), Some(end)));
        assert!(!is_in_range(
            date(2025, 10, 31).and_hms_opt(23, 59, 59).unwrap(),
            Some(start),
            Some(end)
        ));
    }

    #[test]
    fn test_is_in_range_open_ended() {
        let t = ts(2025, 11, 12, 12);
        assert!(is_in_range(t, None, None));
        assert!(is_in_range(t, Some(date(2025, 11, 12)), None));
        assert!(!is_in_range(t, Some(date(2025, 11, 13)), None));
        assert!(is_in_range(t, None, Some(date(2025, 11, 12))));
        assert!(!is_in_range(t, None, Some(date(2025, 11, 11))));
    }

    #[test]
    fn test_presets() {
        let today = date(2025, 3, 15);
        let presets = date_range_presets(today);
        assert_eq!(presets.len(), 5);

        let last_7 = resolve_preset("last-7-days", today).unwrap();
        assert_eq!(last_7, DateRange::between(date(2025, 3, 9), today));

        let this_month = resolve_preset("THIS-MONTH", today).unwrap();
        assert_eq!(this_month, DateRange::between(date(2025, 3, 1), date(2025, 3, 31)));

        let last_month = resolve_preset("last-month", today).unwrap();
        assert_eq!(last_month, DateRange::between(date(2025, 2, 1), date(2025, 2, 28)));

        assert!(resolve_preset("next-year", today).is_none());
    }

    #[test]
    fn test_last_month_in_january() {
        let range = resolve_preset("last-month", date(2026, 1, 10)).unwrap();
        assert_eq!(range, DateRange::between(date(2025, 12, 1), date(2025, 12, 31)));
    }
}
