//! Cross-rate conversion and display formatting.

use crate::core::unit::{Unit, UnitKind};

/// Fraction digits always shown, whatever the unit kind.
pub const MIN_FRACTION_DIGITS: usize = 2;

/// Parses the leading number of `text`, ignoring anything after it, so
/// "12abc" is 12. Text with no leading number, or one that is not finite,
/// is zero.
pub fn parse_amount(text: &str) -> f64 {
    let text = text.trim_start();
    match text[..numeric_prefix_len(text)].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// Length of the longest `[+-]digits[.digits][e[+-]digits]` prefix.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    end = digits_from(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}

/// `amount` of `from` expressed in `to`, going through the reference unit.
pub fn convert_value(amount: f64, from: &Unit, to: &Unit) -> f64 {
    (amount / from.rate_to_reference) * to.rate_to_reference
}

/// Converts and formats for display in `to`'s precision.
pub fn convert(amount: f64, from: &Unit, to: &Unit) -> String {
    if amount == 0.0 {
        return "0.00".to_string();
    }
    format_amount(convert_value(amount, from, to), to.kind)
}

/// Renders `value` with thousands separators and between
/// [`MIN_FRACTION_DIGITS`] and `kind.max_fraction_digits()` decimals.
pub fn format_amount(value: f64, kind: UnitKind) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    let max_digits = kind.max_fraction_digits();
    // Ties round away from zero, which `{:.N}` alone does not do.
    let scale = 10f64.powi(max_digits as i32);
    let rounded = (value.abs() * scale).round() / scale;
    let fixed = format!("{:.*}", max_digits, rounded);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.trim_end_matches('0').to_string();
    while frac.len() < MIN_FRACTION_DIGITS {
        frac.push('0');
    }

    let grouped = group_thousands(int_part);
    let negative = value < 0.0 && (grouped != "0" || frac.chars().any(|c| c != '0'));
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
