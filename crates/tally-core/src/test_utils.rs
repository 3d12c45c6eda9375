//! Fixtures shared by unit tests

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{Category, Expense, PaymentMethod};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Timestamp at the given hour of a day
pub fn ts(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, 0, 0).unwrap()
}

/// Credit card expense with no merchant
pub fn expense(id: &str, amount: f64, date: NaiveDateTime, category: Category) -> Expense {
    Expense::new(id, amount, date, category, PaymentMethod::CreditCard)
}

pub fn paid_with(
    id: &str,
    amount: f64,
    date: NaiveDateTime,
    category: Category,
    payment_method: PaymentMethod,
) -> Expense {
    Expense::new(id, amount, date, category, payment_method)
}

/// A month of mixed spending used by several modules
pub fn sample_expenses() -> Vec<Expense> {
    vec![
        expense("1", 12.50, ts(2025, 11, 3, 8), Category::FoodDining).with_merchant("Blue Bottle"),
        paid_with("2", 45.00, ts(2025, 11, 3, 18), Category::Transportation, PaymentMethod::DebitCard)
            .with_merchant("Shell"),
        expense("3", 120.00, ts(2025, 11, 9, 12), Category::Shopping).with_merchant("Target"),
        paid_with("4", 8.25, ts(2025, 11, 10, 7), Category::FoodDining, PaymentMethod::Cash)
            .with_merchant("Blue Bottle"),
        paid_with("5", 89.99, ts(2025, 11, 15, 20), Category::BillsUtilities, PaymentMethod::BankTransfer)
            .with_merchant("City Power"),
        expense("6", 15.49, ts(2025, 11, 20, 21), Category::Entertainment).with_merchant("Netflix"),
        expense("7", 64.30, ts(2025, 12, 1, 13), Category::FoodDining).with_merchant("Trader Joe's"),
    ]
}
