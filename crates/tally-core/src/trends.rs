//! Time-bucketed spending trends and running totals

use tracing::debug;

use crate::dates::{bucket_label, bucket_start, group_by_period};
use crate::models::{CumulativePoint, Expense, Granularity, TrendPoint};
use crate::numbers::round_money;

/// Total and count per bucket, oldest bucket first
///
/// Ordering follows the bucket key, never the display label.
pub fn calculate_spending_trend(expenses: &[Expense], granularity: Granularity) -> Vec<TrendPoint> {
    let trend: Vec<TrendPoint> = group_by_period(expenses, granularity)
        .into_iter()
        .filter_map(|(period, items)| {
            let first = items.first()?;
            let start = bucket_start(first.day(), granularity);
            Some(TrendPoint {
                period,
                label: bucket_label(start, granularity),
                start,
                amount: round_money(items.iter().map(|e| e.amount).sum()),
                count: items.len() as i64,
            })
        })
        .collect();

    debug!(
        points = trend.len(),
        granularity = granularity.as_str(),
        "Calculated spending trend"
    );
    trend
}

/// Running total with one point per calendar day that has spending
pub fn calculate_cumulative_spending(expenses: &[Expense]) -> Vec<CumulativePoint> {
    calculate_cumulative_spending_by(expenses, Granularity::Daily)
}

/// Running total with one point per bucket of the given granularity
///
/// Buckets come from [`group_by_period`] whose keys are chronological, so
/// this is an accumulation over expenses sorted by date ascending. Amounts
/// are positive, so the series never decreases.
pub fn calculate_cumulative_spending_by(
    expenses: &[Expense],
    granularity: Granularity,
) -> Vec<CumulativePoint> {
    let mut running = 0.0;
    group_by_period(expenses, granularity)
        .into_values()
        .filter_map(|items| {
            let first = items.first()?;
            running += items.iter().map(|e| e.amount).sum::<f64>();
            Some(CumulativePoint {
                date: bucket_start(first.day(), granularity),
                cumulative: round_money(running),
            })
        })
        .collect()
}
