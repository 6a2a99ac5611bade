/// Render a USD amount with two decimals and comma thousands separators,
/// e.g. `1234567.891` becomes `$1,234,567.89`.
pub fn format_usd_price(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Two-decimal percent change, sign carried by the number itself.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_price_with_thousands_separators() {
        assert_eq!(format_usd_price(50000.11), "$50,000.11");
        assert_eq!(format_usd_price(1234567.891), "$1,234,567.89");
    }

    #[test]
    fn formats_small_prices_without_grouping() {
        assert_eq!(format_usd_price(0.9), "$0.90");
        assert_eq!(format_usd_price(999.999), "$1,000.00");
    }

    #[test]
    fn formats_negative_price_with_leading_sign() {
        assert_eq!(format_usd_price(-1234.5), "-$1,234.50");
    }

    #[test]
    fn formats_percent_to_two_decimals() {
        assert_eq!(format_percent(2.349), "2.35%");
        assert_eq!(format_percent(-1.5), "-1.50%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
