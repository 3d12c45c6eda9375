//! Snapshot loading and argument resolution shared by every command

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::dates::{date_range_presets, resolve_preset};
use tally_core::filter::filter_expenses;
use tally_core::import::load_expenses;
use tally_core::{
    Category, Expense, ExpenseFilter, Granularity, PaymentMethod, ReportConfig,
};
use tracing::debug;

use crate::cli::{CompareArgs, FilterArgs};

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

/// Parse an optional granularity argument, falling back to the config default
pub fn parse_granularity(value: Option<&str>, config: &ReportConfig) -> Result<Granularity> {
    match value {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e)),
        None => Ok(config.granularity),
    }
}

/// Load the report config
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    ReportConfig::load(path).context("Failed to load report config")
}

/// Build an [`ExpenseFilter`] from the global filter flags
///
/// `--from`/`--to` override the matching side of a `--period` preset.
pub fn build_filter(args: &FilterArgs, today: NaiveDate) -> Result<ExpenseFilter> {
    let (mut start, mut end) = match args.period.as_deref() {
        Some(name) => {
            let range = resolve_preset(name, today).ok_or_else(|| {
                let names: Vec<&str> = date_range_presets(today).iter().map(|p| p.name).collect();
                anyhow::anyhow!("Unknown period: {}. Available: {}", name, names.join(", "))
            })?;
            (range.start, range.end)
        }
        None => (None, None),
    };
    if let Some(from) = args.from.as_deref() {
        start = Some(parse_date(from, "--from")?);
    }
    if let Some(to) = args.to.as_deref() {
        end = Some(parse_date(to, "--to")?);
    }
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            anyhow::bail!("Start date {} is after end date {}", s, e);
        }
    }

    if let (Some(min), Some(max)) = (args.min, args.max) {
        if min > max {
            anyhow::bail!("--min ({}) must not exceed --max ({})", min, max);
        }
    }

    let categories = args
        .categories
        .iter()
        .map(|c| c.parse::<Category>().map_err(|e| anyhow::anyhow!(e)))
        .collect::<Result<Vec<_>>>()?;
    let payment_methods = args
        .payment_methods
        .iter()
        .map(|m| m.parse::<PaymentMethod>().map_err(|e| anyhow::anyhow!(e)))
        .collect::<Result<Vec<_>>>()?;

    let mut filter = ExpenseFilter::new()
        .date_range(start, end)
        .categories(categories)
        .amount_range(args.min, args.max)
        .payment_methods(payment_methods);
    if let Some(query) = args.search.as_deref() {
        filter = filter.search(query);
    }
    Ok(filter)
}

/// Load the snapshot at `path` and apply the global filters
pub fn load_snapshot(path: &Path, args: &FilterArgs) -> Result<Vec<Expense>> {
    let expenses = load_expenses(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    let filter = build_filter(args, Local::now().date_naive())?;
    let filtered = filter_expenses(&expenses, &filter);
    debug!(
        total = expenses.len(),
        kept = filtered.len(),
        active_filters = filter.active_filter_count(),
        "Applied filters"
    );
    Ok(filtered)
}

pub fn cmd_presets(today: NaiveDate, json: bool) -> Result<()> {
    let presets = date_range_presets(today);
    if json {
        return super::print_json(&presets);
    }

    println!();
    println!("🗓️  Date Presets (today is {})", today);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:14} │ {:14} │ {:10} │ {:10}", "Name", "Label", "Start", "End");
    println!("   ───────────────┼────────────────┼────────────┼───────────");
    for preset in &presets {
        println!(
            "   {:14} │ {:14} │ {:10} │ {:10}",
            preset.name, preset.label, preset.start, preset.end
        );
    }

    Ok(())
}

/// Two date ranges and their labels, resolved for `compare`
#[derive(Debug, Clone, PartialEq)]
pub struct ComparePeriods {
    pub period1: (NaiveDate, NaiveDate),
    pub period2: (NaiveDate, NaiveDate),
    pub label1: String,
    pub label2: String,
}

pub fn resolve_compare(args: &CompareArgs, config: &ReportConfig) -> Result<ComparePeriods> {
    let period1 = (parse_date(&args.from1, "--from1")?, parse_date(&args.to1, "--to1")?);
    let period2 = (parse_date(&args.from2, "--from2")?, parse_date(&args.to2, "--to2")?);
    for (start, end) in [period1, period2] {
        if start > end {
            anyhow::bail!("Start date {} is after end date {}", start, end);
        }
    }

    let label1 = args
        .label1
        .clone()
        .unwrap_or_else(|| config.period1_label.clone());
    let label2 = args
        .label2
        .clone()
        .unwrap_or_else(|| config.period2_label.clone());
    // Period labels become JSON keys next to `category` in comparison rows
    for label in [&label1, &label2] {
        if label == "category" {
            anyhow::bail!("Period label \"{}\" is reserved", label);
        }
    }

    Ok(ComparePeriods {
        period1,
        period2,
        label1,
        label2,
    })
}
