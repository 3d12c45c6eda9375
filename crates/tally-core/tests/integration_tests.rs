//! Integration tests for tally-core
//!
//! These tests exercise the full snapshot → filter → stats/trends → chart
//! workflow through the public API.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tally_core::{
    charts::{
        to_bar_chart_data, to_category_comparison_data, to_line_chart_data, to_pie_chart_data,
    },
    dates::{group_by_period, is_in_range},
    filter::filter_expenses,
    import::{load_expenses, parse_csv, parse_json},
    numbers::calculate_percentage,
    stats::{
        calculate_spending_by_category, calculate_spending_by_payment_method,
        calculate_summary_stats, compare_spending_periods, get_top_merchants,
    },
    trends::{calculate_cumulative_spending, calculate_spending_trend},
    Category, Expense, ExpenseFilter, Granularity, PaymentMethod,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

fn record(id: &str, amount: f64, when: NaiveDateTime, category: Category) -> Expense {
    Expense::new(id, amount, when, category, PaymentMethod::CreditCard)
}

/// Two months of exported expenses in the storage layer's JSON shape.
/// Amounts are chosen so unrounded float sums drift past 2 decimals.
fn json_snapshot() -> &'static str {
    r#"[
        {"id":"e01","amount":4.10,"date":"2025-10-01T08:05:00.000","category":"FOOD_DINING","paymentMethod":"CASH","merchant":"Blue Bottle"},
        {"id":"e02","amount":1450.00,"date":"2025-10-01T09:00:00.000","category":"BILLS_UTILITIES","paymentMethod":"BANK_TRANSFER","merchant":"Landlord","description":"October rent"},
        {"id":"e03","amount":62.35,"date":"2025-10-04T17:45:00.000","category":"TRANSPORTATION","paymentMethod":"DEBIT_CARD","merchant":"Shell"},
        {"id":"e04","amount":4.10,"date":"2025-10-08T08:02:00.000","category":"FOOD_DINING","paymentMethod":"CASH","merchant":"Blue Bottle"},
        {"id":"e05","amount":15.49,"date":"2025-10-15T00:00:00.000","category":"ENTERTAINMENT","paymentMethod":"CREDIT_CARD","merchant":"Netflix"},
        {"id":"e06","amount":210.70,"date":"2025-10-22T14:30:00.000","category":"SHOPPING","paymentMethod":"CREDIT_CARD","merchant":"Target"},
        {"id":"e07","amount":0.10,"date":"2025-10-31T23:59:59.000","category":"OTHER","paymentMethod":"DIGITAL_WALLET"},
        {"id":"e08","amount":0.20,"date":"2025-11-01T00:00:00.000","category":"OTHER","paymentMethod":"DIGITAL_WALLET"},
        {"id":"e09","amount":1450.00,"date":"2025-11-01T09:00:00.000","category":"BILLS_UTILITIES","paymentMethod":"BANK_TRANSFER","merchant":"Landlord","description":"November rent"},
        {"id":"e10","amount":4.10,"date":"2025-11-09T08:00:00.000","category":"FOOD_DINING","paymentMethod":"CASH","merchant":"Blue Bottle"},
        {"id":"e11","amount":88.00,"date":"2025-11-12T19:10:00.000","category":"HEALTHCARE","paymentMethod":"CREDIT_CARD","merchant":"CVS"},
        {"id":"e12","amount":15.49,"date":"2025-11-15T00:00:00.000","category":"ENTERTAINMENT","paymentMethod":"CREDIT_CARD","merchant":"Netflix"},
        {"id":"e13","amount":33.33,"date":"2025-11-15T23:59:59.000","category":"PERSONAL_CARE","paymentMethod":"DEBIT_CARD","merchant":"Supercuts"}
    ]"#
}

fn snapshot() -> Vec<Expense> {
    parse_json(json_snapshot().as_bytes()).expect("Failed to parse snapshot")
}

// =============================================================================
// Snapshot Workflow Tests
// =============================================================================

#[test]
fn test_full_snapshot_workflow() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("expenses.json");
    std::fs::write(&path, json_snapshot()).unwrap();

    let expenses = load_expenses(&path).expect("Failed to load snapshot");
    assert_eq!(expenses.len(), 13);

    let stats = calculate_summary_stats(&expenses);
    assert_eq!(stats.transaction_count, 13);
    assert_eq!(stats.total_spending, 3337.96);
    assert_eq!(stats.average_amount, 256.77);
    assert_eq!(stats.highest_expense.as_ref().map(|e| e.id.as_str()), Some("e02"));
    assert_eq!(stats.most_used_category, Some(Category::FoodDining));
    assert_eq!(stats.most_used_payment_method, Some(PaymentMethod::CreditCard));

    let trend = calculate_spending_trend(&expenses, Granularity::Monthly);
    let labels: Vec<&str> = trend.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Oct 2025", "Nov 2025"]);
    assert_eq!(trend[0].amount, 1746.84);
    assert_eq!(trend[1].amount, 1591.12);

    let pie = to_pie_chart_data(&expenses);
    assert_eq!(pie[0].name, "Bills & Utilities");
    assert_eq!(pie[0].value, 2900.0);
    assert_eq!(pie[0].percentage, 86.9);
}

#[test]
fn test_json_and_csv_snapshots_agree() {
    let csv = "\
id,amount,date,category,paymentMethod,merchant,description
e01,4.10,2025-10-01T08:05:00,FOOD_DINING,CASH,Blue Bottle,
e02,\"1,450.00\",2025-10-01T09:00:00,Bills & Utilities,Bank Transfer,Landlord,October rent
e03,62.35,2025-10-04T17:45:00,TRANSPORTATION,DEBIT_CARD,Shell,
";
    let from_csv = parse_csv(csv.as_bytes()).expect("Failed to parse CSV");
    let from_json: Vec<Expense> = snapshot().into_iter().take(3).collect();

    assert_eq!(
        calculate_summary_stats(&from_csv),
        calculate_summary_stats(&from_json)
    );
}

#[test]
fn test_filter_then_aggregate() {
    let expenses = snapshot();
    let filter = ExpenseFilter::new()
        .date_range(Some(date(2025, 11, 1)), Some(date(2025, 11, 30)))
        .payment_methods(vec![PaymentMethod::CreditCard, PaymentMethod::DebitCard]);

    let november_cards = filter_expenses(&expenses, &filter);
    let ids: Vec<&str> = november_cards.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e11", "e12", "e13"]);

    let stats = calculate_summary_stats(&november_cards);
    assert_eq!(stats.total_spending, 136.82);
    // Input collection is untouched
    assert_eq!(expenses.len(), 13);
}

// =============================================================================
// Aggregation Properties
// =============================================================================

#[test]
fn test_totals_match_sum_of_parts() {
    let expenses = snapshot();
    let stats = calculate_summary_stats(&expenses);

    let by_category: f64 = stats.spending_by_category.iter().map(|b| b.total).sum();
    let by_method: f64 = stats.spending_by_payment_method.iter().map(|b| b.total).sum();
    assert!((by_category - stats.total_spending).abs() < 0.01);
    assert!((by_method - stats.total_spending).abs() < 0.01);

    let counted: i64 = stats.spending_by_category.iter().map(|b| b.count).sum();
    assert_eq!(counted, stats.transaction_count);
}

#[test]
fn test_percentages_sum_to_hundred() {
    let expenses = snapshot();
    for total in [
        calculate_spending_by_category(&expenses)
            .iter()
            .map(|b| b.percentage)
            .sum::<f64>(),
        calculate_spending_by_payment_method(&expenses)
            .iter()
            .map(|b| b.percentage)
            .sum::<f64>(),
    ] {
        assert!((99.9..=100.1).contains(&total), "percentages sum to {}", total);
    }
}

#[test]
fn test_breakdown_worked_example() {
    let expenses = vec![
        record("1", 10.0, at(2025, 11, 1, 9, 0), Category::FoodDining),
        record("2", 30.0, at(2025, 11, 2, 9, 0), Category::FoodDining),
        record("3", 60.0, at(2025, 11, 3, 9, 0), Category::Travel),
    ];
    let breakdown = calculate_spending_by_category(&expenses);
    assert_eq!(breakdown.len(), 2);

    let food = breakdown.iter().find(|b| b.key == Category::FoodDining).unwrap();
    assert_eq!((food.total, food.count, food.percentage), (40.0, 2, 40.0));
    let travel = breakdown.iter().find(|b| b.key == Category::Travel).unwrap();
    assert_eq!((travel.total, travel.count, travel.percentage), (60.0, 1, 60.0));
}

#[test]
fn test_comparison_against_empty_period() {
    let expenses = vec![record("1", 50.0, at(2025, 11, 10, 9, 0), Category::Shopping)];
    let comparison = compare_spending_periods(
        &expenses,
        date(2025, 10, 1),
        date(2025, 10, 31),
        date(2025, 11, 1),
        date(2025, 11, 30),
    );
    assert_eq!(comparison.period1_total, 0.0);
    assert_eq!(comparison.period2_total, 50.0);
    assert_eq!(comparison.difference, 50.0);
    assert_eq!(comparison.percentage_change, 0.0);
    assert_eq!(comparison.period1_average, 0.0);
    assert_eq!(calculate_percentage(50.0, 0.0), 0.0);
}

#[test]
fn test_month_over_month_comparison() {
    let comparison = compare_spending_periods(
        &snapshot(),
        date(2025, 10, 1),
        date(2025, 10, 31),
        date(2025, 11, 1),
        date(2025, 11, 30),
    );
    assert_eq!(comparison.period1_total, 1746.84);
    assert_eq!(comparison.period2_total, 1591.12);
    assert_eq!(comparison.difference, -155.72);
    assert_eq!(comparison.percentage_change, -8.9);
}

#[test]
fn test_top_merchants_limits() {
    let expenses = snapshot();
    assert!(get_top_merchants(&expenses, 0).is_empty());
    assert!(get_top_merchants(&expenses, -3).is_empty());

    let top = get_top_merchants(&expenses, 3);
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].merchant, "Landlord");
    assert_eq!(top[0].total, 2900.0);
    assert_eq!(top[0].count, 2);

    // Fewer distinct merchants than the limit
    assert_eq!(get_top_merchants(&expenses, 100).len(), 8);
}

// =============================================================================
// Calendar Bucketing
// =============================================================================

#[test]
fn test_sunday_week_bucketing() {
    let expenses = vec![
        record("sun", 1.0, at(2025, 11, 9, 0, 0), Category::Other),
        record("sat", 2.0, at(2025, 11, 15, 23, 59), Category::Other),
        record("next-sun", 4.0, at(2025, 11, 16, 0, 0), Category::Other),
    ];
    let buckets = group_by_period(&expenses, Granularity::Weekly);
    let keys: Vec<&str> = buckets.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["2025-11-09", "2025-11-16"]);
    assert_eq!(buckets["2025-11-09"].len(), 2);
}

#[test]
fn test_buckets_partition_input() {
    let expenses = snapshot();
    for granularity in [Granularity::Daily, Granularity::Weekly, Granularity::Monthly] {
        let buckets = group_by_period(&expenses, granularity);
        let placed: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(placed, expenses.len());

        let trend = calculate_spending_trend(&expenses, granularity);
        let counted: i64 = trend.iter().map(|p| p.count).sum();
        assert_eq!(counted, expenses.len() as i64);
        assert!(trend.windows(2).all(|w| w[0].start < w[1].start));
    }
}

#[test]
fn test_end_of_day_is_inclusive() {
    let late = at(2025, 10, 31, 23, 59) + chrono::Duration::seconds(59);
    assert!(is_in_range(late, Some(date(2025, 10, 1)), Some(date(2025, 10, 31))));
    assert!(!is_in_range(
        at(2025, 11, 1, 0, 0),
        Some(date(2025, 10, 1)),
        Some(date(2025, 10, 31))
    ));
}

#[test]
fn test_utc_timestamps_bucket_by_local_day() {
    // Late-evening UTC instants land on the local calendar day
    let json = r#"[
        {"id":"z1","amount":5.00,"date":"2025-11-10T01:00:00.000Z","category":"OTHER","paymentMethod":"CASH"},
        {"id":"z2","amount":7.00,"date":"2025-11-30T23:30:00.000Z","category":"OTHER","paymentMethod":"CASH"}
    ]"#;
    let expenses = parse_json(json.as_bytes()).expect("Failed to parse snapshot");

    for (expense, (day, hour, minute)) in expenses.iter().zip([(10, 1, 0), (30, 23, 30)]) {
        let instant = Utc.with_ymd_and_hms(2025, 11, day, hour, minute, 0).unwrap();
        let local = instant.with_timezone(&Local).naive_local();
        assert_eq!(expense.date, local);

        let daily = group_by_period(&expenses, Granularity::Daily);
        let key = local.date().format("%Y-%m-%d").to_string();
        assert!(daily[&key].iter().any(|e| e.id == expense.id));

        let monthly = group_by_period(&expenses, Granularity::Monthly);
        let key = local.date().format("%Y-%m").to_string();
        assert!(monthly[&key].iter().any(|e| e.id == expense.id));
    }
}

// =============================================================================
// Trends and Charts
// =============================================================================

#[test]
fn test_cumulative_is_non_decreasing() {
    let expenses = snapshot();
    let points = calculate_cumulative_spending(&expenses);
    assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    assert!(points.windows(2).all(|w| w[1].cumulative >= w[0].cumulative));
    assert_eq!(points.last().map(|p| p.cumulative), Some(3337.96));
}

#[test]
fn test_charts_are_idempotent() {
    let expenses = snapshot();
    let before = expenses.clone();

    assert_eq!(to_pie_chart_data(&expenses), to_pie_chart_data(&expenses));
    assert_eq!(
        to_bar_chart_data(&expenses, Granularity::Weekly, None),
        to_bar_chart_data(&expenses, Granularity::Weekly, None)
    );
    assert_eq!(
        to_line_chart_data(&expenses, Granularity::Daily, true, None),
        to_line_chart_data(&expenses, Granularity::Daily, true, None)
    );
    assert_eq!(expenses, before);
}

#[test]
fn test_empty_input_yields_empty_results() {
    let stats = calculate_summary_stats(&[]);
    assert_eq!(stats.total_spending, 0.0);
    assert_eq!(stats.average_amount, 0.0);
    assert_eq!(stats.transaction_count, 0);
    assert!(stats.highest_expense.is_none());
    assert!(stats.most_used_category.is_none());
    assert!(stats.spending_by_category.is_empty());

    assert!(to_pie_chart_data(&[]).is_empty());
    assert!(to_bar_chart_data(&[], Granularity::Monthly, None).is_empty());
    assert!(to_line_chart_data(&[], Granularity::Monthly, true, None).is_empty());
    assert!(to_category_comparison_data(&[], &[], "A", "B").is_empty());
}

#[test]
fn test_category_comparison_from_filtered_months() {
    let expenses = snapshot();
    let october = filter_expenses(
        &expenses,
        &ExpenseFilter::new().date_range(Some(date(2025, 10, 1)), Some(date(2025, 10, 31))),
    );
    let november = filter_expenses(
        &expenses,
        &ExpenseFilter::new().date_range(Some(date(2025, 11, 1)), Some(date(2025, 11, 30))),
    );

    let rows = to_category_comparison_data(&october, &november, "October", "November");
    let shopping = rows.iter().find(|r| r.category == "Shopping").unwrap();
    assert_eq!(shopping.values["October"], 210.7);
    assert_eq!(shopping.values["November"], 0.0);

    let healthcare = rows.iter().find(|r| r.category == "Healthcare").unwrap();
    assert_eq!(healthcare.values["October"], 0.0);
    assert_eq!(healthcare.values["November"], 88.0);
}
