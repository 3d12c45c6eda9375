//! Domain models for Tally

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A closed vocabulary that expenses can be broken down by.
///
/// `all()` is declaration order, which is also the `Ord` order of the
/// implementing enums and the tie-break order for "most used" lookups.
pub trait Dimension: Copy + Ord + Serialize + 'static {
    fn all() -> &'static [Self];
    fn label(&self) -> &'static str;
    fn icon(&self) -> &'static str;
    fn color(&self) -> &'static str;
}

/// Normalize a display label or enum value into enum-value form,
/// e.g. "Food & Dining" -> "FOOD_DINING"
fn normalize_key(s: &str) -> String {
    s.trim()
        .to_uppercase()
        .replace(" & ", "_")
        .replace(|c: char| c == ' ' || c == '-', "_")
}

/// Expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    FoodDining,
    Transportation,
    Entertainment,
    BillsUtilities,
    Shopping,
    Healthcare,
    Education,
    Travel,
    PersonalCare,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "FOOD_DINING",
            Self::Transportation => "TRANSPORTATION",
            Self::Entertainment => "ENTERTAINMENT",
            Self::BillsUtilities => "BILLS_UTILITIES",
            Self::Shopping => "SHOPPING",
            Self::Healthcare => "HEALTHCARE",
            Self::Education => "EDUCATION",
            Self::Travel => "TRAVEL",
            Self::PersonalCare => "PERSONAL_CARE",
            Self::Other => "OTHER",
        }
    }
}

impl Dimension for Category {
    fn all() -> &'static [Category] {
        &[
            Self::FoodDining,
            Self::Transportation,
            Self::Entertainment,
            Self::BillsUtilities,
            Self::Shopping,
            Self::Healthcare,
            Self::Education,
            Self::Travel,
            Self::PersonalCare,
            Self::Other,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::PersonalCare => "Personal Care",
            Self::Other => "Other",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::FoodDining => "🍔",
            Self::Transportation => "🚗",
            Self::Entertainment => "🎬",
            Self::BillsUtilities => "💡",
            Self::Shopping => "🛍️",
            Self::Healthcare => "🏥",
            Self::Education => "📚",
            Self::Travel => "✈️",
            Self::PersonalCare => "💅",
            Self::Other => "📦",
        }
    }

    /// Chart color (WCAG AA contrast against white)
    fn color(&self) -> &'static str {
        match self {
            Self::FoodDining => "#DC2626",
            Self::Transportation => "#2563EB",
            Self::Entertainment => "#CA8A04",
            Self::BillsUtilities => "#16A34A",
            Self::Shopping => "#9333EA",
            Self::Healthcare => "#EA580C",
            Self::Education => "#DB2777",
            Self::Travel => "#0891B2",
            Self::PersonalCare => "#7C3AED",
            Self::Other => "#64748B",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "FOOD_DINING" | "FOOD" => Ok(Self::FoodDining),
            "TRANSPORTATION" => Ok(Self::Transportation),
            "ENTERTAINMENT" => Ok(Self::Entertainment),
            "BILLS_UTILITIES" | "BILLS" => Ok(Self::BillsUtilities),
            "SHOPPING" => Ok(Self::Shopping),
            "HEALTHCARE" => Ok(Self::Healthcare),
            "EDUCATION" => Ok(Self::Education),
            "TRAVEL" => Ok(Self::Travel),
            "PERSONAL_CARE" => Ok(Self::PersonalCare),
            "OTHER" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method used for an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    DigitalWallet,
    BankTransfer,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::CreditCard => "CREDIT_CARD",
            Self::DebitCard => "DEBIT_CARD",
            Self::DigitalWallet => "DIGITAL_WALLET",
            Self::BankTransfer => "BANK_TRANSFER",
            Self::Other => "OTHER",
        }
    }
}

impl Dimension for PaymentMethod {
    fn all() -> &'static [PaymentMethod] {
        &[
            Self::Cash,
            Self::CreditCard,
            Self::DebitCard,
            Self::DigitalWallet,
            Self::BankTransfer,
            Self::Other,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::DigitalWallet => "Digital Wallet",
            Self::BankTransfer => "Bank Transfer",
            Self::Other => "Other",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::Cash => "💵",
            Self::CreditCard => "💳",
            Self::DebitCard => "💳",
            Self::DigitalWallet => "📱",
            Self::BankTransfer => "🏦",
            Self::Other => "💰",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Cash => "#16A34A",
            Self::CreditCard => "#2563EB",
            Self::DebitCard => "#0891B2",
            Self::DigitalWallet => "#9333EA",
            Self::BankTransfer => "#CA8A04",
            Self::Other => "#64748B",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "CASH" => Ok(Self::Cash),
            "CREDIT_CARD" | "CREDIT" => Ok(Self::CreditCard),
            "DEBIT_CARD" | "DEBIT" => Ok(Self::DebitCard),
            "DIGITAL_WALLET" | "WALLET" => Ok(Self::DigitalWallet),
            "BANK_TRANSFER" | "TRANSFER" => Ok(Self::BankTransfer),
            "OTHER" => Ok(Self::Other),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time bucket size for trend reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            _ => Err(format!(
                "Unknown granularity: {}. Available: daily, weekly, monthly",
                s
            )),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single expense as handed over by the storage layer
///
/// Field names follow the exported snapshot format (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    pub category: Category,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub merchant: String,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        default,
        with = "timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        date: NaiveDateTime,
        category: Category,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            date,
            category,
            payment_method,
            description: String::new(),
            merchant: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = merchant.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Calendar day the expense falls on
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// Lenient timestamp (de)serialization for snapshot files
///
/// Accepts RFC 3339 (converted to the local timezone), naive ISO timestamps
/// with `T` or space separator, and bare dates (midnight). Naive values are
/// already local wall-clock time and are kept as-is.
pub mod timestamp {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, FORMAT) {
            return Some(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(dt);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> std::result::Result<S::Ok, S::Error> {
            match value {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> std::result::Result<Option<NaiveDateTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|s| {
                super::parse(&s)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", s)))
            })
            .transpose()
        }
    }
}

// =============================================================================
// Report types
// =============================================================================

/// Spending for one group of a categorical dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown<K> {
    pub key: K,
    pub total: f64,
    pub count: i64,
    /// Share of the grand total, 0-100 with one decimal
    pub percentage: f64,
}

pub type CategoryBreakdown = Breakdown<Category>;
pub type PaymentMethodBreakdown = Breakdown<PaymentMethod>;

/// Aggregated summary statistics for a set of expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_spending: f64,
    pub average_amount: f64,
    pub transaction_count: i64,
    pub highest_expense: Option<Expense>,
    pub most_used_category: Option<Category>,
    pub most_used_payment_method: Option<PaymentMethod>,
    pub spending_by_category: Vec<CategoryBreakdown>,
    pub spending_by_payment_method: Vec<PaymentMethodBreakdown>,
}

/// Spending in one time bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Sortable bucket key ("2025-11-12", "2025-11-09", "2025-11")
    pub period: String,
    /// Human-readable bucket label
    pub label: String,
    /// First day of the bucket
    pub start: NaiveDate,
    pub amount: f64,
    pub count: i64,
}

/// Running total at the end of one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub cumulative: f64,
}

/// Spending in two date ranges side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub period1_total: f64,
    pub period2_total: f64,
    /// period2 - period1
    pub difference: f64,
    /// difference / period1 * 100, or 0 when period1 is 0
    pub percentage_change: f64,
    pub period1_average: f64,
    pub period2_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantTotal {
    pub merchant: String,
    pub total: f64,
    pub count: i64,
}

// =============================================================================
// Chart data
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChartDataPoint {
    pub name: String,
    pub value: f64,
    pub color: String,
    pub percentage: f64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartDataPoint {
    pub date: String,
    pub amount: f64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartDataPoint {
    pub date: String,
    pub amount: f64,
}

/// One row of a grouped bar chart: a category label plus one value per
/// period label (serialized as dynamic keys next to `category`, so a period
/// labelled `"category"` would collide with it)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryComparisonDataPoint {
    pub category: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}
