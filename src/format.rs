//! Number formatting with Indian digit grouping (lakh/crore).

use rust_decimal::{Decimal, RoundingStrategy};

/// Group an unsigned integer digit string as `12,34,56,789`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

fn split_parts(value: Decimal) -> (bool, String, String) {
    let text = value.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, String::new()),
    };
    (value.is_sign_negative() && !value.is_zero(), int_part, frac_part)
}

/// Format like a locale-aware number: Indian grouping, at most three
/// fraction digits, trailing zeros dropped (`1000000` → `10,00,000`).
pub fn format_indian(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let (negative, int_part, frac_part) = split_parts(rounded);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_indian(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// Format a rupee amount with exactly two decimals (`129914` → `1,29,914.00`).
pub fn format_inr(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let (negative, int_part, frac_part) = split_parts(rounded);

    format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        group_indian(&int_part),
        frac_part
    )
}

/// Format a signed change with an explicit plus sign for positive values.
pub fn format_signed(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{}", format_indian(value))
    } else {
        format_indian(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_grouping() {
        assert_eq!(group_indian("5"), "5");
        assert_eq!(group_indian("500"), "500");
        assert_eq!(group_indian("5500"), "5,500");
        assert_eq!(group_indian("129914"), "1,29,914");
        assert_eq!(group_indian("123456789"), "12,34,56,789");
    }

    #[test]
    fn test_format_indian_drops_trailing_zeros() {
        assert_eq!(format_indian(dec!(10000)), "10,000");
        assert_eq!(format_indian(dec!(5500.50)), "5,500.5");
        assert_eq!(format_indian(dec!(24835.85)), "24,835.85");
        assert_eq!(format_indian(dec!(-87.45)), "-87.45");
    }

    #[test]
    fn test_format_inr_two_decimals() {
        assert_eq!(format_inr(dec!(129914)), "1,29,914.00");
        assert_eq!(format_inr(dec!(12.5)), "12.50");
        assert_eq!(format_inr(dec!(0)), "0.00");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(dec!(12)), "+12");
        assert_eq!(format_signed(dec!(-3.5)), "-3.5");
        assert_eq!(format_signed(dec!(0)), "0");
    }
}
