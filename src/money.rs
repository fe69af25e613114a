use crate::tax::cgt::round_cents;
use rust_decimal::Decimal;

/// Two decimal places, no currency symbol or grouping (e.g. `-1234.50`)
pub fn format_fixed(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}

/// Australian dollar display with thousands separators (e.g. `-$1,234.50`)
pub fn format_aud(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < Decimal::ZERO {
        format!("-${}.{}", grouped, cents)
    } else {
        format!("${}.{}", grouped, cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fixed_pads_and_rounds() {
        assert_eq!(format_fixed(dec!(0)), "0.00");
        assert_eq!(format_fixed(dec!(2000.1)), "2000.10");
        assert_eq!(format_fixed(dec!(999.995)), "1000.00");
        assert_eq!(format_fixed(dec!(-5000)), "-5000.00");
    }

    #[test]
    fn aud_groups_thousands() {
        assert_eq!(format_aud(dec!(0)), "$0.00");
        assert_eq!(format_aud(dec!(999.9)), "$999.90");
        assert_eq!(format_aud(dec!(1000)), "$1,000.00");
        assert_eq!(format_aud(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_aud(dec!(100000)), "$100,000.00");
    }

    #[test]
    fn aud_negative_sign_before_symbol() {
        assert_eq!(format_aud(dec!(-5000)), "-$5,000.00");
        assert_eq!(format_aud(dec!(-0.001)), "$0.00");
    }
}
