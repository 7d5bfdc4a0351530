//! Number formatting for table cells and invoices.

/// Format a monetary amount with the currency sign and two decimals.
pub fn format_amount(value: f64) -> String {
    format!("${:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.5), "$1234.50");
        assert_eq!(format_amount(0.0), "$0.00");
        assert_eq!(format_amount(-12.345), "$-12.35");
    }
}
