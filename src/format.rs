//! Display formatting for amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Most fraction digits shown by [`format_currency`].
pub const MAX_FRACTION_DIGITS: u32 = 3;

/// Formats an amount with thousands separators, as Korean won amounts are
/// shown: `1234567` becomes `"1,234,567"`.
///
/// Fractions are kept up to three digits (rounded half away from zero)
/// without trailing zeros.
///
/// ```
/// use payroll_engine::format::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_currency(Decimal::from(1_234_567)), "1,234,567");
/// assert_eq!(format_currency(Decimal::from_str("-5000.5").unwrap()), "-5,000.5");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}
