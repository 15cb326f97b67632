//! fr-FR rendering of amounts and dates, matching what the browser's
//! `Intl` formatters print for the same locale.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

const GROUP_SEPARATOR: char = '\u{202F}';
const CURRENCY_SEPARATOR: char = '\u{00A0}';

/// `1234.5` → `1 234,50 €`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{},{}{}€", sign, grouped, frac_part, CURRENCY_SEPARATOR)
}

/// `2026-01-06` → `06/01/2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// "3 candidats", "1 candidat".
pub fn candidate_count_label(count: usize) -> String {
    if count == 1 {
        "1 candidat".to_string()
    } else {
        format!("{} candidats", count)
    }
}
