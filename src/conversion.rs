//! Currency conversion through the ruble pivot, plus display helpers.

use crate::rate_errors::RateError;
use crate::rates::RateTable;

/// Convert `amount` of `from_code` into `to_code`.
///
/// Both rates are rubles per unit, so the result is
/// `amount * rates[from] / rates[to]`. No rounding is applied.
pub fn convert(
    amount: f64,
    rates: &RateTable,
    from_code: &str,
    to_code: &str,
) -> Result<f64, RateError> {
    let from_rate = rates
        .get(from_code)
        .ok_or_else(|| RateError::UnknownCurrency(from_code.to_string()))?;
    let to_rate = rates
        .get(to_code)
        .ok_or_else(|| RateError::UnknownCurrency(to_code.to_string()))?;

    Ok(amount * (from_rate / to_rate))
}

/// Two-decimal rendering used for every computed figure shown to users
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// Render a user-entered amount as typed, without trailing `.0`
pub fn format_amount(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateTable {
        RateTable::with_base()
            .with_rate("USD", 90.0)
            .with_rate("EUR", 98.0)
    }

    #[test]
    fn test_convert_through_ruble() {
        let result = convert(100.0, &rates(), "USD", "EUR").unwrap();
        assert_eq!(format_money(result), "91.84");
    }

    #[test]
    fn test_convert_to_and_from_base() {
        assert_eq!(convert(2.0, &rates(), "USD", "RUB").unwrap(), 180.0);
        assert_eq!(convert(180.0, &rates(), "RUB", "USD").unwrap(), 2.0);
    }

    #[test]
    fn test_convert_unknown_code() {
        let err = convert(1.0, &rates(), "USD", "XYZ").unwrap_err();
        assert!(matches!(err, RateError::UnknownCurrency(code) if code == "XYZ"));
    }

    #[test]
    fn test_negative_and_zero_amounts_pass_through() {
        assert_eq!(convert(0.0, &rates(), "USD", "EUR").unwrap(), 0.0);
        assert!(convert(-10.0, &rates(), "USD", "EUR").unwrap() < 0.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(12.5), "12.5");
    }
}
