use civic_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// `$1,234,567.89`. Rounds half-up to cents; negatives keep a leading `-`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// `12.50%`.
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}

/// Placeholder for absent free-text fields.
pub fn opt_text(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => "n/a",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(200000)), "$200,000.00");
        assert_eq!(format_currency(dec!(999)), "$999.00");
        assert_eq!(format_currency(dec!(0)), "$0.00");
    }

    #[test]
    fn currency_rounds_half_up() {
        assert_eq!(format_currency(dec!(0.005)), "$0.01");
        assert_eq!(format_currency(dec!(10.125)), "$10.13");
        assert_eq!(format_currency(dec!(10.124)), "$10.12");
    }

    #[test]
    fn currency_keeps_sign() {
        assert_eq!(format_currency(dec!(-1500.5)), "-$1,500.50");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn percentage_has_two_places() {
        assert_eq!(format_percentage(dec!(20)), "20.00%");
        assert_eq!(format_percentage(dec!(12.345)), "12.35%");
    }

    #[test]
    fn opt_text_falls_back() {
        assert_eq!(opt_text(Some("Mayor")), "Mayor");
        assert_eq!(opt_text(Some("   ")), "n/a");
        assert_eq!(opt_text(None), "n/a");
    }
}
