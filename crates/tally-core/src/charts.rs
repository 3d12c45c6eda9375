//! Chart-ready projections of statistics and trends
//!
//! Nothing here recomputes an aggregate. Pie percentages are copied from
//! the breakdowns in [`crate::stats`] and time series come from
//! [`crate::trends`], so the chart API and the statistics API always agree.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::dates::format_date_by_granularity;
use crate::models::*;
use crate::stats::{calculate_spending_by_category, calculate_spending_by_payment_method};
use crate::trends::{calculate_cumulative_spending_by, calculate_spending_trend};

/// Formats a bucket start date for display on a chart axis
pub type DateFormatter<'a> = &'a dyn Fn(NaiveDate, Granularity) -> String;

fn format_bucket(date: NaiveDate, granularity: Granularity, formatter: Option<DateFormatter>) -> String {
    match formatter {
        Some(format) => format(date, granularity),
        None => format_date_by_granularity(date, granularity),
    }
}

fn pie_from_breakdown<K: Dimension>(breakdown: Vec<Breakdown<K>>) -> Vec<PieChartDataPoint> {
    let mut points: Vec<PieChartDataPoint> = breakdown
        .into_iter()
        .map(|b| PieChartDataPoint {
            name: b.key.label().to_string(),
            value: b.total,
            color: b.key.color().to_string(),
            percentage: b.percentage,
            count: b.count,
        })
        .collect();
    points.sort_by(|a, b| b.value.total_cmp(&a.value));
    points
}

/// Category slices, largest first
pub fn to_pie_chart_data(expenses: &[Expense]) -> Vec<PieChartDataPoint> {
    pie_from_breakdown(calculate_spending_by_category(expenses))
}

/// Payment method slices, largest first
pub fn to_payment_method_pie_chart_data(expenses: &[Expense]) -> Vec<PieChartDataPoint> {
    pie_from_breakdown(calculate_spending_by_payment_method(expenses))
}

/// Per-bucket totals, oldest first
pub fn to_bar_chart_data(
    expenses: &[Expense],
    granularity: Granularity,
    formatter: Option<DateFormatter>,
) -> Vec<BarChartDataPoint> {
    calculate_spending_trend(expenses, granularity)
        .into_iter()
        .map(|p| BarChartDataPoint {
            date: format_bucket(p.start, granularity, formatter),
            amount: p.amount,
            count: p.count,
        })
        .collect()
}

/// Per-bucket totals or running totals, oldest first
///
/// Both modes bucket through the same grouping, so toggling `cumulative`
/// changes the values but never the x-axis.
pub fn to_line_chart_data(
    expenses: &[Expense],
    granularity: Granularity,
    cumulative: bool,
    formatter: Option<DateFormatter>,
) -> Vec<LineChartDataPoint> {
    if cumulative {
        calculate_cumulative_spending_by(expenses, granularity)
            .into_iter()
            .map(|p| LineChartDataPoint {
                date: format_bucket(p.date, granularity, formatter),
                amount: p.cumulative,
            })
            .collect()
    } else {
        calculate_spending_trend(expenses, granularity)
            .into_iter()
            .map(|p| LineChartDataPoint {
                date: format_bucket(p.start, granularity, formatter),
                amount: p.amount,
            })
            .collect()
    }
}

/// Category totals of two expense sets side by side
///
/// Outer join: a category spent in either set gets a row, with 0 on the
/// side where it is absent. Rows follow category declaration order. If both
/// labels are equal the second set's value wins. Labels must not be
/// `"category"`, which is already a key of every row.
pub fn to_category_comparison_data(
    expenses1: &[Expense],
    expenses2: &[Expense],
    label1: &str,
    label2: &str,
) -> Vec<CategoryComparisonDataPoint> {
    let totals = |expenses: &[Expense]| -> BTreeMap<Category, f64> {
        calculate_spending_by_category(expenses)
            .into_iter()
            .map(|b| (b.key, b.total))
            .collect()
    };
    let totals1 = totals(expenses1);
    let totals2 = totals(expenses2);

    let categories: BTreeSet<Category> = totals1.keys().chain(totals2.keys()).copied().collect();

    categories
        .into_iter()
        .map(|category| {
            let mut values = BTreeMap::new();
            values.insert(
                label1.to_string(),
                totals1.get(&category).copied().unwrap_or(0.0),
            );
            values.insert(
                label2.to_string(),
                totals2.get(&category).copied().unwrap_or(0.0),
            );
            CategoryComparisonDataPoint {
                category: category.label().to_string(),
                values,
            }
        })
        .collect()
}
