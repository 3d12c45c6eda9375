//! Numeric helpers shared by every aggregation
//!
//! All money leaving the engine goes through [`round_money`] and every
//! percentage through [`calculate_percentage`], so callers never re-round.

/// Sum of all values
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean, 0 for empty input
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Largest value, 0 for empty input
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Smallest value, 0 for empty input
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Round half away from zero at the given number of decimals
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let multiplier = 10f64.powi(decimals as i32);
    (value * multiplier).round() / multiplier
}

/// Round a money amount to cents
pub fn round_money(value: f64) -> f64 {
    round_to_decimals(value, 2)
}

/// `value` as a percentage of `total` with one decimal, 0 when `total` is 0
pub fn calculate_percentage(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    round_to_decimals((value / total) * 100.0, 1)
}

/// Each value as a percentage of the sum of all values
pub fn calculate_percentages(values: &[f64]) -> Vec<f64> {
    let total = sum(values);
    values
        .iter()
        .map(|v| calculate_percentage(*v, total))
        .collect()
}

/// Each value as a one-decimal share of the sum, adjusted so the shares add
/// up to exactly 100.
///
/// Shares start out as [`calculate_percentage`]. The tenths that rounding
/// gained or lost are then handed back one at a time to the value whose
/// exact share is furthest from its rounded one, earlier values winning
/// ties. No share moves more than 0.1 from its rounded value. All zeros
/// when the sum is 0.
pub fn calculate_percentage_shares(values: &[f64]) -> Vec<f64> {
    let total = sum(values);
    if total == 0.0 {
        return vec![0.0; values.len()];
    }

    // Work in whole tenths of a percent
    let exact: Vec<f64> = values.iter().map(|v| v / total * 1000.0).collect();
    let mut tenths: Vec<i64> = values
        .iter()
        .map(|v| (calculate_percentage(*v, total) * 10.0).round() as i64)
        .collect();

    let mut residual = 1000 - tenths.iter().sum::<i64>();
    while residual != 0 {
        let step = residual.signum();
        let error = |i: usize| (exact[i] - tenths[i] as f64) * step as f64;
        let pick = (1..values.len()).fold(0, |best, i| if error(i) > error(best) { i } else { best });
        tenths[pick] += step;
        residual -= step;
    }

    tenths.into_iter().map(|t| t as f64 / 10.0).collect()
}

/// Whether a value has at most two fractional digits
pub fn has_max_two_decimals(value: f64) -> bool {
    if !value.is_finite() {
        return false;
    }
    let cents = value * 100.0;
    (cents - cents.round()).abs() < 1e-6
}

/// Format a number with thousands separators and fixed decimals
pub fn format_number(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && formatted.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format as US dollars, e.g. `$1,234.50` or `-$12.00`
pub fn format_currency(amount: f64) -> String {
    let number = format_number(amount, 2);
    match number.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", number),
    }
}

/// Format a percentage, e.g. `12.3%`
pub fn format_percentage(value: f64, decimals: u32) -> String {
    // + 0.0 turns -0.0 into 0.0
    let rounded = round_to_decimals(value, decimals) + 0.0;
    format!("{:.*}%", decimals as usize, rounded)
}

/// Parse a currency string, ignoring symbols, separators and spaces.
/// Unparseable input yields 0.
pub fn parse_currency(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}
