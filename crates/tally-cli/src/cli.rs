//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tally - Expense analytics from exported snapshots
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Spending statistics, trends and chart data for exported expenses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Expense snapshot (.json or .csv)
    #[arg(short, long, default_value = "expenses.json", global = true)]
    pub file: PathBuf,

    /// Report config file
    ///
    /// Defaults to ~/.local/share/tally/config.toml when present,
    /// otherwise the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters applied to the snapshot before any report runs
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Date preset: today, last-7-days, last-30-days, this-month, last-month
    #[arg(long, global = true)]
    pub period: Option<String>,

    /// Start date (YYYY-MM-DD), overrides the preset start
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), overrides the preset end
    #[arg(long, global = true)]
    pub to: Option<String>,

    /// Only this category (repeatable)
    #[arg(long = "category", global = true)]
    pub categories: Vec<String>,

    /// Only this payment method (repeatable)
    #[arg(long = "payment-method", global = true)]
    pub payment_methods: Vec<String>,

    /// Case-insensitive search in merchant and description
    #[arg(long, global = true)]
    pub search: Option<String>,

    /// Minimum amount (inclusive)
    #[arg(long, global = true)]
    pub min: Option<f64>,

    /// Maximum amount (inclusive)
    #[arg(long, global = true)]
    pub max: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Totals, averages, highest expense and most used category/method
    Summary,

    /// Spending by category
    Categories,

    /// Spending by payment method
    PaymentMethods,

    /// Spending per day, week or month
    Trend {
        /// Granularity: daily, weekly, monthly (defaults to config)
        #[arg(short, long)]
        granularity: Option<String>,
    },

    /// Running total over time
    Cumulative {
        /// Granularity: daily, weekly, monthly
        #[arg(short, long, default_value = "daily")]
        granularity: String,
    },

    /// Top merchants by total spend
    Merchants {
        /// Number of merchants to show (defaults to config)
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Compare two date ranges
    Compare {
        #[command(flatten)]
        periods: CompareArgs,
    },

    /// Print chart data as JSON
    Chart {
        #[command(subcommand)]
        chart: ChartType,
    },

    /// List the date presets accepted by --period
    Presets,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// First period start (YYYY-MM-DD)
    #[arg(long)]
    pub from1: String,

    /// First period end (YYYY-MM-DD)
    #[arg(long)]
    pub to1: String,

    /// Second period start (YYYY-MM-DD)
    #[arg(long)]
    pub from2: String,

    /// Second period end (YYYY-MM-DD)
    #[arg(long)]
    pub to2: String,

    /// Label for the first period (defaults to config)
    #[arg(long)]
    pub label1: Option<String>,

    /// Label for the second period (defaults to config)
    #[arg(long)]
    pub label2: Option<String>,
}

#[derive(Subcommand)]
pub enum ChartType {
    /// Category pie slices
    Pie,

    /// Payment method pie slices
    PaymentPie,

    /// Per-bucket totals
    Bar {
        /// Granularity: daily, weekly, monthly (defaults to config)
        #[arg(short, long)]
        granularity: Option<String>,
    },

    /// Per-bucket totals or running totals
    Line {
        /// Granularity: daily, weekly, monthly (defaults to config)
        #[arg(short, long)]
        granularity: Option<String>,

        /// Plot the running total instead of per-bucket totals
        #[arg(long)]
        cumulative: bool,
    },

    /// Category totals of two date ranges side by side
    Compare {
        #[command(flatten)]
        periods: CompareArgs,
    },
}
