//! Pure conversion arithmetic over a rate table.

use crate::core::error::ConvertError;
use crate::core::rates::RateTable;

/// Amount field input, with "nothing entered yet" kept distinct from an
/// invalid value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput {
    Empty,
    Amount(f64),
}

/// Parses raw amount input.
///
/// Blank input is [`AmountInput::Empty`], not an error; anything else must
/// parse as a finite number.
pub fn parse_amount(raw: &str) -> Result<AmountInput, ConvertError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(AmountInput::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(AmountInput::Amount(value)),
        _ => Err(ConvertError::InvalidAmount(trimmed.to_string())),
    }
}

/// A priced conversion: the cross rate and, when an amount was entered, the
/// unrounded converted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub rate: f64,
    pub amount: Option<f64>,
    pub converted: Option<f64>,
}

/// Converts an amount between two listed currencies, unrounded.
pub fn convert(table: &RateTable, from: &str, to: &str, amount: f64) -> Result<f64, ConvertError> {
    Ok(amount * table.cross_rate(from, to)?)
}

/// Prices a conversion request. Empty input yields a quote with the rate
/// only, so callers render the `0.00` placeholder instead of an error.
pub fn quote(
    table: &RateTable,
    from: &str,
    to: &str,
    input: AmountInput,
) -> Result<Quote, ConvertError> {
    let rate = table.cross_rate(from, to)?;
    let (amount, converted) = match input {
        AmountInput::Empty => (None, None),
        AmountInput::Amount(value) => (Some(value), Some(value * rate)),
    };
    Ok(Quote {
        rate,
        amount,
        converted,
    })
}

/// Exchanges the source and destination currencies.
pub fn swap<T>(from: T, to: T) -> (T, T) {
    (to, from)
}

/// Rounds half away from zero at the given number of decimal places.
///
/// The documented display rounding rule: 1.005 -> 1.01, -1.005 -> -1.01.
pub fn round_display(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Formats a converted amount for display at 2 decimal places.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", round_display(value, 2))
}

/// Formats a cross rate for display at 4 decimal places.
pub fn format_rate(rate: f64) -> String {
    format!("{:.4}", round_display(rate, 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RateTable {
        RateTable::new(
            "USD",
            vec![
                ("USD".to_string(), 1.0),
                ("EUR".to_string(), 0.9),
                ("JPY".to_string(), 150.0),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_amount_blank_is_empty() {
        assert_eq!(parse_amount("").unwrap(), AmountInput::Empty);
        assert_eq!(parse_amount("   ").unwrap(), AmountInput::Empty);
    }

    #[test]
    fn test_parse_amount_accepts_zero_and_negative() {
        assert_eq!(parse_amount("0").unwrap(), AmountInput::Amount(0.0));
        assert_eq!(parse_amount("-12.5").unwrap(), AmountInput::Amount(-12.5));
    }

    #[test]
    fn test_parse_amount_rejects_garbage_and_non_finite() {
        assert!(parse_amount("ten").is_err());
        assert!(parse_amount("1.2.3").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_convert_is_amount_times_cross_rate() {
        let table = sample_table();
        let rate = table.cross_rate("EUR", "JPY").unwrap();
        let converted = convert(&table, "EUR", "JPY", 37.5).unwrap();
        assert_eq!(converted, 37.5 * rate);
    }

    #[test]
    fn test_usd_to_eur_scenario() {
        let table = sample_table();
        let q = quote(&table, "USD", "EUR", AmountInput::Amount(10.0)).unwrap();
        assert_eq!(format_rate(q.rate), "0.9000");
        assert_eq!(format_amount(q.converted.unwrap()), "9.00");
    }

    #[test]
    fn test_eur_to_jpy_scenario() {
        let table = sample_table();
        let q = quote(&table, "EUR", "JPY", AmountInput::Amount(100.0)).unwrap();
        assert_eq!(format_rate(q.rate), "166.6667");
        assert_eq!(format_amount(q.converted.unwrap()), "16666.67");
    }

    #[test]
    fn test_quote_with_empty_amount_has_rate_only() {
        let table = sample_table();
        let q = quote(&table, "USD", "EUR", AmountInput::Empty).unwrap();
        assert_eq!(q.rate, 0.9);
        assert!(q.amount.is_none());
        assert!(q.converted.is_none());
    }

    #[test]
    fn test_quote_unknown_currency_fails() {
        let table = sample_table();
        let err = quote(&table, "USD", "XXX", AmountInput::Empty).unwrap_err();
        assert_eq!(err, ConvertError::UnknownCurrency("XXX".to_string()));
    }

    #[test]
    fn test_swap_exchanges_and_is_idempotent_twice() {
        let (from, to) = swap("USD", "EUR");
        assert_eq!((from, to), ("EUR", "USD"));
        let (from, to) = swap(from, to);
        assert_eq!((from, to), ("USD", "EUR"));
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 0.125 and 0.03125 are exact in binary, so the tie is real:
        // half-to-even would print 0.12 and 0.0312.
        assert_eq!(format_amount(0.125), "0.13");
        assert_eq!(format_amount(-0.125), "-0.13");
        assert_eq!(format_amount(2.344), "2.34");
        assert_eq!(format_rate(0.03125), "0.0313");
        assert_eq!(format_rate(166.66666666), "166.6667");
    }
}
