//! Chart data commands
//!
//! Output is always JSON, in the shape a chart component consumes.

use anyhow::Result;
use tally_core::charts::{
    to_bar_chart_data, to_category_comparison_data, to_line_chart_data,
    to_payment_method_pie_chart_data, to_pie_chart_data,
};
use tally_core::filter::filter_by_date_range;
use tally_core::{Expense, Granularity};

use super::{print_json, ComparePeriods};

pub fn cmd_chart_pie(expenses: &[Expense]) -> Result<()> {
    print_json(&to_pie_chart_data(expenses))
}

pub fn cmd_chart_payment_pie(expenses: &[Expense]) -> Result<()> {
    print_json(&to_payment_method_pie_chart_data(expenses))
}

pub fn cmd_chart_bar(expenses: &[Expense], granularity: Granularity) -> Result<()> {
    print_json(&to_bar_chart_data(expenses, granularity, None))
}

pub fn cmd_chart_line(expenses: &[Expense], granularity: Granularity, cumulative: bool) -> Result<()> {
    print_json(&to_line_chart_data(expenses, granularity, cumulative, None))
}

pub fn cmd_chart_compare(expenses: &[Expense], periods: &ComparePeriods) -> Result<()> {
    let (start1, end1) = periods.period1;
    let (start2, end2) = periods.period2;
    let rows = to_category_comparison_data(
        &filter_by_date_range(expenses, Some(start1), Some(end1)),
        &filter_by_date_range(expenses, Some(start2), Some(end2)),
        &periods.label1,
        &periods.label2,
    );
    print_json(&rows)
}
