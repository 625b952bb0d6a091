//! Amount conversion over a rate table.
use crate::core::currency::RateTable;
use std::collections::BTreeMap;

/// Validation failures reported back to the caller inside the response envelope.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error(
        "One or more of the arguments are missing and/or one or more arguments are in wrong format. \
         Arguments: 'amount'<float> Quantity of currency to change from, \
         'input_currency'<str> Shortcut of currency to change, \
         'output_currency'(optional) <str> Shortcut of currency to get."
    )]
    MissingArgument,

    #[error("'amount' has to be a finite number")]
    InvalidAmount,

    #[error("{0} currency is not in exchange rates")]
    UnknownCurrency(String),

    #[error("Could not connect to the bank API for exchange rates.")]
    UpstreamUnavailable,
}

/// Converts `amount` of `input` into every code in `outputs`.
///
/// All rates share one base currency, so the cross rate is
/// `rates[input] / rates[output]`. Every output code is checked before any
/// value is computed.
pub fn convert(
    amount: f64,
    input: &str,
    outputs: &[String],
    rates: &RateTable,
) -> Result<BTreeMap<String, f64>, ConversionError> {
    if !amount.is_finite() {
        return Err(ConversionError::InvalidAmount);
    }

    let input_rate = rates
        .get(input)
        .ok_or_else(|| ConversionError::UnknownCurrency(input.to_string()))?;

    outputs
        .iter()
        .map(|code| {
            let output_rate = rates
                .get(code)
                .ok_or_else(|| ConversionError::UnknownCurrency(code.clone()))?;
            Ok((code.clone(), amount * input_rate / output_rate))
        })
        .collect()
}

/// Every code in the table except `input`, in table order.
pub fn default_outputs(rates: &RateTable, input: &str) -> Vec<String> {
    rates
        .codes()
        .filter(|code| *code != input)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rates() -> RateTable {
        [("EUR", 25.0), ("USD", 23.0), ("CZK", 1.0)]
            .into_iter()
            .collect()
    }

    fn codes(values: &[&str]) -> Vec<String> {
        values.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_convert_eur_to_usd() {
        let result = convert(10.0, "EUR", &codes(&["USD"]), &sample_rates()).unwrap();
        assert_eq!(result.len(), 1);
        assert!((result["USD"] - 10.0 * 25.0 / 23.0).abs() < 1e-9);
        assert!((result["USD"] - 10.8696).abs() < 1e-4);
    }

    #[test]
    fn test_self_conversion_is_identity() {
        let result = convert(42.5, "EUR", &codes(&["EUR"]), &sample_rates()).unwrap();
        assert_eq!(result["EUR"], 42.5);
    }

    #[test]
    fn test_round_trip() {
        let rates = sample_rates();
        let pairs = [("EUR", "USD"), ("USD", "CZK"), ("CZK", "EUR")];
        for (a, b) in pairs {
            for x in [0.01, 1.0, 99.99, 123456.789] {
                let there = convert(x, a, &codes(&[b]), &rates).unwrap()[b];
                let back = convert(there, b, &codes(&[a]), &rates).unwrap()[a];
                assert!((back - x).abs() < 1e-9 * x.max(1.0), "{a}->{b}->{a}: {x} != {back}");
            }
        }
    }

    #[test]
    fn test_zero_amount_converts_to_zero() {
        let result = convert(0.0, "USD", &codes(&["EUR"]), &sample_rates()).unwrap();
        assert_eq!(result["EUR"], 0.0);
    }

    #[test]
    fn test_invalid_amount() {
        let rates = sample_rates();
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                convert(amount, "EUR", &codes(&["USD"]), &rates),
                Err(ConversionError::InvalidAmount)
            );
        }
    }

    #[test]
    fn test_invalid_amount_is_checked_before_currencies() {
        assert_eq!(
            convert(f64::NAN, "XXX", &codes(&["YYY"]), &sample_rates()),
            Err(ConversionError::InvalidAmount)
        );
    }

    #[test]
    fn test_unknown_input_currency() {
        let err = convert(1.0, "GBP", &codes(&["USD"]), &sample_rates()).unwrap_err();
        assert_eq!(err, ConversionError::UnknownCurrency("GBP".to_string()));
        assert_eq!(err.to_string(), "GBP currency is not in exchange rates");
    }

    #[test]
    fn test_unknown_single_output_currency() {
        let err = convert(1.0, "EUR", &codes(&["GBP"]), &sample_rates()).unwrap_err();
        assert_eq!(err, ConversionError::UnknownCurrency("GBP".to_string()));
    }

    #[test]
    fn test_unknown_code_among_many_outputs_is_rejected() {
        let err = convert(1.0, "EUR", &codes(&["USD", "GBP", "CZK"]), &sample_rates()).unwrap_err();
        assert_eq!(err, ConversionError::UnknownCurrency("GBP".to_string()));
    }

    #[test]
    fn test_multiple_outputs() {
        let result = convert(2.0, "CZK", &codes(&["EUR", "USD"]), &sample_rates()).unwrap();
        assert_eq!(result.len(), 2);
        assert!((result["EUR"] - 2.0 / 25.0).abs() < 1e-12);
        assert!((result["USD"] - 2.0 / 23.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_outputs_exclude_input() {
        let rates = sample_rates();
        assert_eq!(default_outputs(&rates, "EUR"), codes(&["CZK", "USD"]));
        assert_eq!(default_outputs(&rates, "GBP"), codes(&["CZK", "EUR", "USD"]));
        assert!(default_outputs(&RateTable::new(), "EUR").is_empty());
    }
}
