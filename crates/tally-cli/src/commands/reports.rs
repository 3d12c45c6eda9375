//! Report command implementations

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::charts::to_category_comparison_data;
use tally_core::filter::filter_by_date_range;
use tally_core::numbers::{format_currency, format_percentage};
use tally_core::stats::{
    calculate_spending_by_category, calculate_spending_by_payment_method,
    calculate_summary_stats, compare_spending_periods, get_top_merchants,
};
use tally_core::trends::{calculate_cumulative_spending_by, calculate_spending_trend};
use tally_core::{Breakdown, Dimension, Expense, Granularity};

use super::{print_json, truncate, ComparePeriods};

fn dimension_name<K: Dimension>(key: K) -> String {
    format!("{} {}", key.icon(), key.label())
}

pub fn cmd_summary(expenses: &[Expense], json: bool) -> Result<()> {
    let stats = calculate_summary_stats(expenses);
    if json {
        return print_json(&stats);
    }

    println!();
    println!("📊 Spending Summary");
    println!("   ─────────────────────────────────────────────────────────────");

    if stats.transaction_count == 0 {
        println!("   No spending found.");
        return Ok(());
    }

    println!("   {:22} {}", "Total:", format_currency(stats.total_spending));
    println!("   {:22} {}", "Transactions:", stats.transaction_count);
    println!("   {:22} {}", "Average:", format_currency(stats.average_amount));

    if let Some(ref highest) = stats.highest_expense {
        let what = [&highest.merchant, &highest.description, &highest.id]
            .into_iter()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_default();
        println!(
            "   {:22} {} ({}, {})",
            "Highest expense:",
            format_currency(highest.amount),
            truncate(&what, 30),
            highest.day()
        );
    }
    if let Some(category) = stats.most_used_category {
        println!("   {:22} {}", "Most used category:", dimension_name(category));
    }
    if let Some(method) = stats.most_used_payment_method {
        println!("   {:22} {}", "Most used method:", dimension_name(method));
    }

    Ok(())
}

fn print_breakdown<K: Dimension>(title: &str, heading: &str, rows: &[Breakdown<K>]) {
    println!();
    println!("{}", title);
    println!("   ─────────────────────────────────────────────────────────────");

    if rows.is_empty() {
        println!("   No spending found.");
        return;
    }

    println!(
        "   {:25} │ {:>10} │ {:>6} │ {:>5}",
        heading, "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼────────────┼────────┼───────");
    for row in rows {
        println!(
            "   {:25} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            truncate(&dimension_name(row.key), 25),
            row.total,
            row.percentage,
            row.count
        );
    }

    let total: f64 = rows.iter().map(|r| r.total).sum();
    let count: i64 = rows.iter().map(|r| r.count).sum();
    println!("   ──────────────────────────┼────────────┼────────┼───────");
    println!("   {:25} │ {:>10.2} │ {:>6} │ {:>5}", "Total", total, "", count);
}

pub fn cmd_categories(expenses: &[Expense], json: bool) -> Result<()> {
    let breakdown = calculate_spending_by_category(expenses);
    if json {
        return print_json(&breakdown);
    }
    print_breakdown("🏷️  Spending by Category", "Category", &breakdown);
    Ok(())
}

pub fn cmd_payment_methods(expenses: &[Expense], json: bool) -> Result<()> {
    let breakdown = calculate_spending_by_payment_method(expenses);
    if json {
        return print_json(&breakdown);
    }
    print_breakdown("💳 Spending by Payment Method", "Payment Method", &breakdown);
    Ok(())
}

pub fn cmd_trend(expenses: &[Expense], granularity: Granularity, json: bool) -> Result<()> {
    let trend = calculate_spending_trend(expenses, granularity);
    if json {
        return print_json(&trend);
    }

    println!();
    println!("📈 Spending Trends ({})", granularity.as_str());
    println!("   ─────────────────────────────────────────────────────────────");

    if trend.is_empty() {
        println!("   No spending data found.");
        return Ok(());
    }

    println!("   {:22} │ {:>10} │ {:>5}", "Period", "Amount", "Count");
    println!("   ───────────────────────┼────────────┼───────");

    for point in &trend {
        println!(
            "   {:22} │ {:>10.2} │ {:>5}",
            point.label, point.amount, point.count
        );
    }

    let total_amount: f64 = trend.iter().map(|p| p.amount).sum();
    let total_count: i64 = trend.iter().map(|p| p.count).sum();
    let avg_amount = total_amount / trend.len() as f64;

    println!("   ───────────────────────┼────────────┼───────");
    println!(
        "   {:22} │ {:>10.2} │ {:>5}",
        "Total", total_amount, total_count
    );
    println!("   {:22} │ {:>10.2} │", "Average", avg_amount);

    Ok(())
}

pub fn cmd_cumulative(expenses: &[Expense], granularity: Granularity, json: bool) -> Result<()> {
    let points = calculate_cumulative_spending_by(expenses, granularity);
    if json {
        return print_json(&points);
    }

    println!();
    println!("📈 Cumulative Spending ({})", granularity.as_str());
    println!("   ─────────────────────────────────────────────────────────────");

    if points.is_empty() {
        println!("   No spending data found.");
        return Ok(());
    }

    println!("   {:12} │ {:>12}", "Date", "Running");
    println!("   ─────────────┼──────────────");
    for point in &points {
        println!("   {:12} │ {:>12.2}", point.date, point.cumulative);
    }

    Ok(())
}

/// Merchant name padded to `width` columns. The blank merchant is dimmed,
/// with the padding applied before the color codes so columns line up.
pub fn merchant_cell(merchant: &str, width: usize) -> String {
    if merchant.is_empty() {
        format!("\x1b[2m{:width$}\x1b[0m", "(no merchant)", width = width)
    } else {
        format!("{:width$}", truncate(merchant, width), width = width)
    }
}

pub fn cmd_merchants(expenses: &[Expense], limit: i64, json: bool) -> Result<()> {
    let merchants = get_top_merchants(expenses, limit);
    if json {
        return print_json(&merchants);
    }

    println!();
    println!("🏪 Top Merchants");
    println!("   ─────────────────────────────────────────────────────────────");

    if merchants.is_empty() {
        println!("   No spending found.");
        return Ok(());
    }

    println!(
        "   {:3} │ {:30} │ {:>10} │ {:>5}",
        "#", "Merchant", "Amount", "Count"
    );
    println!("   ────┼────────────────────────────────┼────────────┼───────");

    for (i, merchant) in merchants.iter().enumerate() {
        println!(
            "   {:>3} │ {} │ {:>10.2} │ {:>5}",
            i + 1,
            merchant_cell(&merchant.merchant, 30),
            merchant.total,
            merchant.count
        );
    }

    Ok(())
}

fn in_period(expenses: &[Expense], (start, end): (NaiveDate, NaiveDate)) -> Vec<Expense> {
    filter_by_date_range(expenses, Some(start), Some(end))
}

pub fn cmd_compare(expenses: &[Expense], periods: &ComparePeriods, json: bool) -> Result<()> {
    let (start1, end1) = periods.period1;
    let (start2, end2) = periods.period2;
    let comparison = compare_spending_periods(expenses, start1, end1, start2, end2);
    let categories = to_category_comparison_data(
        &in_period(expenses, periods.period1),
        &in_period(expenses, periods.period2),
        &periods.label1,
        &periods.label2,
    );

    if json {
        return print_json(&serde_json::json!({
            "comparison": comparison,
            "categories": categories,
        }));
    }

    println!();
    println!("⚖️  Period Comparison");
    println!("   {}: {} to {}", periods.label1, start1, end1);
    println!("   {}: {} to {}", periods.label2, start2, end2);
    println!("   ─────────────────────────────────────────────────────────────");

    println!(
        "   {:22} │ {:>12} │ {:>12}",
        "", truncate(&periods.label1, 12), truncate(&periods.label2, 12)
    );
    println!("   ───────────────────────┼──────────────┼──────────────");
    println!(
        "   {:22} │ {:>12.2} │ {:>12.2}",
        "Total", comparison.period1_total, comparison.period2_total
    );
    println!(
        "   {:22} │ {:>12.2} │ {:>12.2}",
        "Average", comparison.period1_average, comparison.period2_average
    );
    println!();
    println!(
        "   Change: {} ({})",
        format_currency(comparison.difference),
        format_percentage(comparison.percentage_change, 1)
    );
    if comparison.period1_total == 0.0 {
        println!("   \x1b[2mNo spending in {}, percentage change shown as 0\x1b[0m", periods.label1);
    }

    if categories.is_empty() {
        return Ok(());
    }

    println!();
    println!(
        "   {:22} │ {:>12} │ {:>12}",
        "Category", truncate(&periods.label1, 12), truncate(&periods.label2, 12)
    );
    println!("   ───────────────────────┼──────────────┼──────────────");
    for row in &categories {
        let value = |label: &str| row.values.get(label).copied().unwrap_or(0.0);
        println!(
            "   {:22} │ {:>12.2} │ {:>12.2}",
            truncate(&row.category, 22),
            value(&periods.label1),
            value(&periods.label2)
        );
    }

    Ok(())
}
