//! Conversion result and its canonical JSON rendering

use super::rates::Rates;
use super::request::ConversionRequest;
use rust_decimal::prelude::{Decimal, FromPrimitive, RoundingStrategy, ToPrimitive};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputAmount {
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub input: InputAmount,
    /// Keys are whatever the provider returned, sorted.
    pub output: BTreeMap<String, f64>,
}

impl ConversionResult {
    /// Renders the result with sorted keys and four-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Rounds to two decimals, ties away from zero. The value is first taken as
/// its shortest decimal form, so 2.675 rounds to 2.68 even though the nearest
/// binary double lies just below it. Non-finite values are returned as is.
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Multiplies the request amount by every returned rate.
pub fn format(request: &ConversionRequest, rates: &Rates) -> ConversionResult {
    let output = rates
        .iter()
        .map(|(code, rate)| (code.clone(), round2(request.amount * rate)))
        .collect();

    ConversionResult {
        input: InputAmount {
            amount: request.amount,
            currency: request.input_currency.clone(),
        },
        output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: f64, currency: &str) -> ConversionRequest {
        ConversionRequest {
            amount,
            input_currency: currency.to_string(),
            output_currencies: vec![],
        }
    }

    fn rates(pairs: &[(&str, f64)]) -> Rates {
        pairs.iter().map(|(c, r)| (c.to_string(), *r)).collect()
    }

    #[test]
    fn test_rounding() {
        let result = format(&request(100.0, "EUR"), &rates(&[("X", 0.9)]));
        assert_eq!(result.output["X"], 90.0);

        let result = format(&request(10.92, "GBP"), &rates(&[("X", 1.10345)]));
        assert_eq!(result.output["X"], 12.05);
    }

    #[test]
    fn test_round2_ties_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(1.004), 1.0);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(1.005), 1.01);
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_output_keeps_every_provider_code() {
        let result = format(
            &request(2.0, "USD"),
            &rates(&[("JPY", 150.0), ("EUR", 0.5), ("GBP", 0.25)]),
        );
        let keys: Vec<&str> = result.output.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["EUR", "GBP", "JPY"]);
        assert_eq!(result.output["JPY"], 300.0);
    }

    #[test]
    fn test_canonical_json_shape() {
        let result = format(&request(100.0, "EUR"), &rates(&[("CZK", 25.5)]));
        let expected = r#"{
    "input": {
        "amount": 100.0,
        "currency": "EUR"
    },
    "output": {
        "CZK": 2550.0
    }
}"#;
        assert_eq!(result.to_json_pretty().unwrap(), expected);
    }

    #[test]
    fn test_empty_output_json() {
        let result = format(&request(1.0, "EUR"), &Rates::new());
        let json: serde_json::Value =
            serde_json::from_str(&result.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["output"], serde_json::json!({}));
        assert_eq!(json["input"]["currency"], "EUR");
    }
}
