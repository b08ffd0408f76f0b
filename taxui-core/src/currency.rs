//! Dollar-input display formatting and the balance-due computation.
//!
//! Unfocused inputs show `$1,234.50`; focused inputs show the bare numeric
//! string for editing. Stripping keeps only digits and the decimal point, so
//! a pasted `$1,234.50` round-trips. Input that still fails to parse clamps
//! to zero and renders `$0.00` — the edit is never rejected.

/// Keep only digits and the decimal point.
fn strip_non_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Parse a display or raw string as an amount; unparseable input counts as
/// zero, matching the fallback the balance computation applies.
pub fn parse_amount(raw: &str) -> f64 {
    strip_non_numeric(raw).parse::<f64>().unwrap_or(0.0)
}

/// Group the integer digits of a non-negative `{:.2}` rendering.
fn group_thousands(fixed: &str) -> String {
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed, "00"));
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    format!("{grouped}.{frac_part}")
}

/// Two-decimal grouped rendering without a symbol, for computed displays
/// whose surrounding markup carries its own `$`.
pub fn format_amount(value: f64) -> String {
    group_thousands(&format!("{:.2}", value.max(0.0)))
}

/// Unfocused rendering of a dollar input: `"1234.5"` becomes `"$1,234.50"`.
pub fn format_currency(raw: &str) -> String {
    format!("${}", format_amount(parse_amount(raw)))
}

/// Focused rendering: strip back to the bare numeric string.
pub fn unformat_currency(display: &str) -> String {
    strip_non_numeric(display)
}

/// Balance due is never negative.
pub fn balance_due(tentative_tax: f64, total_payments: f64) -> f64 {
    (tentative_tax - total_payments).max(0.0)
}
