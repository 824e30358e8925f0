//! Formatting helpers shared by the presentation views.

use chrono::NaiveDate;

/// Format an amount as en-US USD, e.g. `$1,234.56`.
///
/// Rounds to the nearest cent; amounts are catalog prices, so the sub-cent
/// drift of binary floats stays well below the rounding threshold.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (idx, ch) in dollars.chars().enumerate() {
        if idx > 0 && (dollars.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{fraction:02}")
}

/// Long-form en-US date, e.g. `January 2, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_currency_with_separators() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(9.99), "$9.99");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.0), "-$42.00");
    }

    #[test]
    fn rounds_to_the_nearest_cent() {
        assert_eq!(format_currency(10.006), "$10.01");
        assert_eq!(format_currency(19.999), "$20.00");
    }

    #[test]
    fn formats_long_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
        assert_eq!(format_date(date), "January 2, 2024");

        let date = NaiveDate::from_ymd_opt(1965, 8, 1).expect("valid date");
        assert_eq!(format_date(date), "August 1, 1965");
    }
}
