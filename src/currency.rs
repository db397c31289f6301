//! Currency formatting for prices and the delivery tax.
//!
//! Output follows the locale's standard currency layout: symbol, a space,
//! the integer part with thousands grouping, then exactly two decimals.
//! With the default pt-BR settings, `1234.5` becomes `R$ 1.234,50`.

use crate::config::CurrencyConfig;

/// Format `amount` with the configured symbol and separators.
///
/// Amounts are rounded half away from zero to whole cents. Cents are held
/// in an `i64`: amounts beyond about ±9.2e16 are clamped to that range and
/// NaN formats as zero.
pub fn format_price(amount: f64, currency: &CurrencyConfig) -> String {
    let cents = (amount * 100.0)
        .round()
        .clamp(i64::MIN as f64, i64::MAX as f64) as i64;
    let negative = cents < 0;
    let cents = cents.unsigned_abs();

    let integer = group_digits(cents / 100, currency.group_separator);
    let fraction = cents % 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&currency.symbol);
    out.push(' ');
    out.push_str(&integer);
    out.push(currency.decimal_separator);
    out.push_str(&format!("{:02}", fraction));
    out
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
