//! Expense filtering, search and sorting
//!
//! Used to narrow a snapshot before handing it to the analytics functions.
//! Every function returns a new vector; the input slice is never touched.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::DateRange;
use crate::models::{Category, Dimension, Expense, PaymentMethod};

/// Inclusive amount bounds; `None` leaves a side open
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Combined filter criteria. `Default` is the cleared filter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilter {
    pub date_range: DateRange,
    /// Empty means every category
    pub categories: Vec<Category>,
    pub amount_range: AmountRange,
    /// Empty means every payment method
    pub payment_methods: Vec<PaymentMethod>,
    pub search_query: String,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_range = DateRange::new(start, end);
        self
    }

    pub fn categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn amount_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.amount_range = AmountRange { min, max };
        self
    }

    pub fn payment_methods(mut self, methods: Vec<PaymentMethod>) -> Self {
        self.payment_methods = methods;
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }

    /// Number of active criteria (a date range or amount range counts once)
    pub fn active_filter_count(&self) -> usize {
        [
            !self.date_range.is_unbounded(),
            !self.categories.is_empty(),
            self.amount_range.min.is_some() || self.amount_range.max.is_some(),
            !self.payment_methods.is_empty(),
            !self.search_query.trim().is_empty(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.date_range.contains(expense.date)
            && (self.categories.is_empty() || self.categories.contains(&expense.category))
            && in_amount_range(expense.amount, self.amount_range)
            && (self.payment_methods.is_empty()
                || self.payment_methods.contains(&expense.payment_method))
            && matches_query(expense, &normalize_query(&self.search_query))
    }
}

fn in_amount_range(amount: f64, range: AmountRange) -> bool {
    range.min.map_or(true, |min| amount >= min) && range.max.map_or(true, |max| amount <= max)
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// `query` must already be normalized
fn matches_query(expense: &Expense, query: &str) -> bool {
    query.is_empty()
        || expense.description.to_lowercase().contains(query)
        || expense.merchant.to_lowercase().contains(query)
}

/// Apply every active criterion of `filter`
pub fn filter_expenses(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    if filter.is_empty() {
        return expenses.to_vec();
    }
    expenses
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect()
}

pub fn filter_by_date_range(
    expenses: &[Expense],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Expense> {
    let range = DateRange::new(start, end);
    expenses
        .iter()
        .filter(|e| range.contains(e.date))
        .cloned()
        .collect()
}

pub fn filter_by_categories(expenses: &[Expense], categories: &[Category]) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| categories.is_empty() || categories.contains(&e.category))
        .cloned()
        .collect()
}

pub fn filter_by_amount_range(
    expenses: &[Expense],
    min: Option<f64>,
    max: Option<f64>,
) -> Vec<Expense> {
    let range = AmountRange { min, max };
    expenses
        .iter()
        .filter(|e| in_amount_range(e.amount, range))
        .cloned()
        .collect()
}

pub fn filter_by_payment_methods(expenses: &[Expense], methods: &[PaymentMethod]) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| methods.is_empty() || methods.contains(&e.payment_method))
        .cloned()
        .collect()
}

/// Case-insensitive substring search over description and merchant
pub fn search_expenses(expenses: &[Expense], query: &str) -> Vec<Expense> {
    let query = normalize_query(query);
    expenses
        .iter()
        .filter(|e| matches_query(e, &query))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Amount,
    Category,
    Merchant,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            "merchant" => Ok(Self::Merchant),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

fn compare_by(field: SortField, a: &Expense, b: &Expense) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Amount => a.amount.total_cmp(&b.amount),
        SortField::Category => a.category.label().cmp(b.category.label()),
        SortField::Merchant => a.merchant.to_lowercase().cmp(&b.merchant.to_lowercase()),
    }
}

/// Stable sort on one field; equal elements keep their input order in
/// both directions
pub fn sort_expenses(expenses: &[Expense], field: SortField, order: SortOrder) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    match order {
        SortOrder::Asc => sorted.sort_by(|a, b| compare_by(field, a, b)),
        SortOrder::Desc => sorted.sort_by(|a, b| compare_by(field, b, a)),
    }
    sorted
}

/// Date descending, the order expense lists are shown in
pub fn newest_first(expenses: &[Expense]) -> Vec<Expense> {
    sort_expenses(expenses, SortField::Date, SortOrder::Desc)
}
