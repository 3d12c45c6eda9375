//! Snapshot readers for exported expenses
//!
//! The storage layer exports expenses either as a JSON array (the same
//! shape it persists) or as CSV with a header row. Both are read into
//! [`Expense`] values for the analytics functions.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{timestamp, Category, Expense, PaymentMethod};

/// Supported snapshot formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A JSON snapshot is either a bare array or an object wrapping one
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSnapshot {
    List(Vec<Expense>),
    Wrapped { expenses: Vec<Expense> },
}

/// Drop expenses the aggregation functions cannot account for
/// (non-positive or non-finite amounts)
fn keep_valid(expenses: Vec<Expense>) -> Vec<Expense> {
    let before = expenses.len();
    let kept: Vec<Expense> = expenses
        .into_iter()
        .filter(|e| {
            let valid = e.amount.is_finite() && e.amount > 0.0;
            if !valid {
                warn!(id = %e.id, amount = e.amount, "Skipping expense with invalid amount");
            }
            valid
        })
        .collect();
    if kept.len() != before {
        debug!("Kept {} of {} expenses", kept.len(), before);
    }
    kept
}

/// Parse a JSON snapshot
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let snapshot: JsonSnapshot = serde_json::from_reader(reader)?;
    let expenses = match snapshot {
        JsonSnapshot::List(expenses) => expenses,
        JsonSnapshot::Wrapped { expenses } => expenses,
    };
    Ok(keep_valid(expenses))
}

/// Column positions resolved from the CSV header
struct Columns {
    id: Option<usize>,
    amount: usize,
    date: usize,
    category: usize,
    payment_method: usize,
    merchant: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase().replace(|c: char| c == '_' || c == ' ', "");
                names.iter().any(|n| *n == h)
            })
        };
        let require = |names: &[&str]| {
            find(names).ok_or_else(|| {
                Error::InvalidData(format!("Missing CSV column: {}", names[0]))
            })
        };

        Ok(Self {
            id: find(&["id"]),
            amount: require(&["amount"])?,
            date: require(&["date"])?,
            category: require(&["category"])?,
            payment_method: require(&["paymentmethod", "payment"])?,
            merchant: find(&["merchant"]),
            description: find(&["description", "memo"]),
        })
    }
}

fn field<'r>(record: &'r StringRecord, index: usize, row: usize, name: &str) -> Result<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| Error::InvalidData(format!("Row {}: missing {}", row, name)))
}

fn optional_field(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Parse an amount like "1,234.50" or "$12.00"
fn parse_amount(s: &str, row: usize) -> Result<f64> {
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned
        .trim()
        .parse()
        .map_err(|_| Error::InvalidData(format!("Row {}: invalid amount '{}'", row, s)))
}

/// Parse a CSV snapshot
///
/// Header names are matched case-insensitively and ignore `_`/spaces, so
/// both `paymentMethod` and `payment_method` work. Category and payment
/// method cells accept enum values or display labels. Rows without an id
/// get `row-<n>`.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut expenses = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let date_str = field(&record, columns.date, row, "date")?;
        let date = timestamp::parse(date_str).ok_or_else(|| {
            Error::InvalidData(format!("Row {}: invalid date '{}'", row, date_str))
        })?;

        let category: Category = field(&record, columns.category, row, "category")?
            .parse()
            .map_err(|e: String| Error::InvalidData(format!("Row {}: {}", row, e)))?;
        let payment_method: PaymentMethod =
            field(&record, columns.payment_method, row, "payment method")?
                .parse()
                .map_err(|e: String| Error::InvalidData(format!("Row {}: {}", row, e)))?;

        let id = Some(optional_field(&record, columns.id))
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("row-{}", row));

        let amount = parse_amount(field(&record, columns.amount, row, "amount")?, row)?;

        expenses.push(
            Expense::new(id, amount, date, category, payment_method)
                .with_merchant(optional_field(&record, columns.merchant))
                .with_description(optional_field(&record, columns.description)),
        );
    }

    Ok(keep_valid(expenses))
}

/// Parse a snapshot in the given format
pub fn parse_snapshot<R: Read>(reader: R, format: SnapshotFormat) -> Result<Vec<Expense>> {
    match format {
        SnapshotFormat::Json => parse_json(reader),
        SnapshotFormat::Csv => parse_csv(reader),
    }
}

/// Load a snapshot file, picking the format from its extension
pub fn load_expenses(path: &Path) -> Result<Vec<Expense>> {
    let format = SnapshotFormat::from_path(path)?;
    let file = File::open(path)?;
    let expenses = parse_snapshot(BufReader::new(file), format)?;
    info!(
        path = %path.display(),
        count = expenses.len(),
        "Loaded expense snapshot"
    );
    Ok(expenses)
}
