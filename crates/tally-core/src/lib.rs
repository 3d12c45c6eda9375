//! Tally Core Library
//!
//! Analytics and chart-data engine for the Tally expense tracker:
//! - Money rounding, percentages and currency formatting
//! - Calendar bucketing (daily, Sunday-start weekly, monthly)
//! - Summary statistics, breakdowns, period comparison, top merchants
//! - Spending trends and running totals
//! - Chart projections (pie, bar, line, category comparison)
//! - Expense filtering and JSON/CSV snapshot import

pub mod charts;
pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod import;
pub mod models;
pub mod numbers;
pub mod stats;
pub mod trends;

#[cfg(test)]
mod test_utils;

pub use config::ReportConfig;
pub use dates::{DateRange, DateRangePreset};
pub use error::{Error, Result};
pub use filter::{AmountRange, ExpenseFilter, SortField, SortOrder};
pub use import::{load_expenses, SnapshotFormat};
pub use models::{
    BarChartDataPoint, Breakdown, Category, CategoryBreakdown, CategoryComparisonDataPoint,
    CumulativePoint, Dimension, Expense, Granularity, LineChartDataPoint, MerchantTotal,
    PaymentMethod, PaymentMethodBreakdown, PeriodComparison, PieChartDataPoint, SummaryStats,
    TrendPoint,
};
