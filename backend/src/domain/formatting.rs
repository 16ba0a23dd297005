//! Display formatting for money and counts.
//!
//! Amounts render as `<CURRENCY> <grouped>` with comma thousands grouping.
//! Cents are shown only when the amount has a fractional part.

use super::models::settings::DEFAULT_CURRENCY;

pub fn format_money(amount: f64, currency: &str) -> String {
    let code = match currency.trim() {
        "" => DEFAULT_CURRENCY,
        code => code,
    };

    if !amount.is_finite() {
        return format!("{} -", code);
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    if fraction == 0 {
        format!("{} {}{}", code, sign, whole)
    } else {
        format!("{} {}{}.{:02}", code, sign, whole, fraction)
    }
}

pub fn format_count(count: usize) -> String {
    group_thousands(count as u64)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
