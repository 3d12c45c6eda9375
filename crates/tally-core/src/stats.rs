//! Summary statistics, breakdowns, period comparison and merchant ranking
//!
//! Every function is a pure function of the expense slice. Money is summed
//! unrounded and rounded once on the way out, so group totals and the grand
//! total agree to the cent.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::dates::is_in_range;
use crate::models::*;
use crate::numbers::{average, calculate_percentage, calculate_percentage_shares, round_money};

fn amounts(expenses: &[Expense]) -> Vec<f64> {
    expenses.iter().map(|e| e.amount).collect()
}

fn raw_total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum of all amounts
pub fn calculate_total_spending(expenses: &[Expense]) -> f64 {
    round_money(raw_total(expenses))
}

/// Mean amount, 0 for no expenses
pub fn calculate_average_amount(expenses: &[Expense]) -> f64 {
    round_money(average(&amounts(expenses)))
}

/// First expense carrying the largest amount (input order breaks ties)
pub fn find_highest_expense(expenses: &[Expense]) -> Option<&Expense> {
    expenses.iter().fold(None, |best: Option<&Expense>, e| match best {
        Some(b) if b.amount >= e.amount => Some(b),
        _ => Some(e),
    })
}

/// Most frequent value of a dimension.
///
/// Ties go to the value declared first in the enum, not the one seen first
/// in the input.
fn most_used<K: Dimension>(expenses: &[Expense], key: impl Fn(&Expense) -> K) -> Option<K> {
    let mut counts: BTreeMap<K, i64> = BTreeMap::new();
    for expense in expenses {
        *counts.entry(key(expense)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(K, i64)>, (k, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((k, count)),
        })
        .map(|(k, _)| k)
}

pub fn find_most_used_category(expenses: &[Expense]) -> Option<Category> {
    most_used(expenses, |e| e.category)
}

pub fn find_most_used_payment_method(expenses: &[Expense]) -> Option<PaymentMethod> {
    most_used(expenses, |e| e.payment_method)
}

/// Group by a dimension. Only groups with at least one expense are
/// returned, ordered by total descending, then declaration order.
///
/// Percentages are one-decimal shares that add up to exactly 100.
fn breakdown_by<K: Dimension>(
    expenses: &[Expense],
    key: impl Fn(&Expense) -> K,
) -> Vec<Breakdown<K>> {
    let mut groups: BTreeMap<K, (f64, i64)> = BTreeMap::new();
    for expense in expenses {
        let entry = groups.entry(key(expense)).or_insert((0.0, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    // Shares are distributed in declaration order, before sorting by total
    let totals: Vec<f64> = groups.values().map(|(total, _)| *total).collect();
    let shares = calculate_percentage_shares(&totals);

    let mut breakdown: Vec<Breakdown<K>> = groups
        .into_iter()
        .zip(shares)
        .map(|((key, (total, count)), percentage)| Breakdown {
            key,
            total: round_money(total),
            count,
            percentage,
        })
        .collect();

    // Stable sort keeps declaration order between equal totals
    breakdown.sort_by(|a, b| b.total.total_cmp(&a.total));
    breakdown
}

pub fn calculate_spending_by_category(expenses: &[Expense]) -> Vec<CategoryBreakdown> {
    breakdown_by(expenses, |e| e.category)
}

pub fn calculate_spending_by_payment_method(expenses: &[Expense]) -> Vec<PaymentMethodBreakdown> {
    breakdown_by(expenses, |e| e.payment_method)
}

/// Everything the dashboard cards need in one pass over the data
pub fn calculate_summary_stats(expenses: &[Expense]) -> SummaryStats {
    let stats = SummaryStats {
        total_spending: calculate_total_spending(expenses),
        average_amount: calculate_average_amount(expenses),
        transaction_count: expenses.len() as i64,
        highest_expense: find_highest_expense(expenses).cloned(),
        most_used_category: find_most_used_category(expenses),
        most_used_payment_method: find_most_used_payment_method(expenses),
        spending_by_category: calculate_spending_by_category(expenses),
        spending_by_payment_method: calculate_spending_by_payment_method(expenses),
    };
    debug!(
        count = stats.transaction_count,
        total = stats.total_spending,
        categories = stats.spending_by_category.len(),
        "Calculated summary stats"
    );
    stats
}

/// Compare spending in two inclusive date ranges.
///
/// Ranges are applied independently, so an expense inside an overlap counts
/// toward both. `percentage_change` is 0 when the first period has no
/// spending; that is a reporting convention, not "no change".
pub fn compare_spending_periods(
    expenses: &[Expense],
    range1_start: NaiveDate,
    range1_end: NaiveDate,
    range2_start: NaiveDate,
    range2_end: NaiveDate,
) -> PeriodComparison {
    let in_range = |start: NaiveDate, end: NaiveDate| -> Vec<f64> {
        expenses
            .iter()
            .filter(|e| is_in_range(e.date, Some(start), Some(end)))
            .map(|e| e.amount)
            .collect()
    };
    let period1 = in_range(range1_start, range1_end);
    let period2 = in_range(range2_start, range2_end);

    let total1: f64 = period1.iter().sum();
    let total2: f64 = period2.iter().sum();
    let difference = total2 - total1;

    PeriodComparison {
        period1_total: round_money(total1),
        period2_total: round_money(total2),
        difference: round_money(difference),
        percentage_change: calculate_percentage(difference, total1),
        period1_average: round_money(average(&period1)),
        period2_average: round_money(average(&period2)),
    }
}

/// Top merchants by total spend.
///
/// Merchants match exactly (case-sensitive); expenses without a merchant
/// are grouped under the empty string. Ordered by total descending, then
/// count descending, then name ascending.
pub fn get_top_merchants(expenses: &[Expense], limit: i64) -> Vec<MerchantTotal> {
    if limit <= 0 {
        return Vec::new();
    }

    let mut groups: HashMap<&str, (f64, i64)> = HashMap::new();
    for expense in expenses {
        let entry = groups.entry(expense.merchant.as_str()).or_insert((0.0, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut merchants: Vec<MerchantTotal> = groups
        .into_iter()
        .map(|(merchant, (total, count))| MerchantTotal {
            merchant: merchant.to_string(),
            total: round_money(total),
            count,
        })
        .collect();

    merchants.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.merchant.cmp(&b.merchant))
    });
    merchants.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    merchants
}
