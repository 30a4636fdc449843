//! Monetary helpers for SplitLedger.
//!
//! Amounts are currency-agnostic `Decimal` values. They are accumulated at
//! full precision and only rounded when a debt is emitted.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Decimal places used for emitted amounts.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Parse an amount from text. Surrounding whitespace and scientific
/// notation are accepted.
pub fn parse_amount(s: &str) -> Result<Decimal, rust_decimal::Error> {
    let trimmed = s.trim();
    Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))
}

/// Round to `places` decimal places, midpoints away from zero.
pub fn round_amount(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Serde adapter for amounts.
///
/// Deserializes through `Decimal`'s own impl, which takes a JSON number or
/// a numeric string. Serializes as a JSON number: integral values without
/// a fraction, others as floats.
pub mod amount {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.fract().is_zero() {
            if let Some(whole) = value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match value.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => Err(serde::ser::Error::custom(format!(
                "amount {} is not representable as a number",
                value
            ))),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Deserialize)]
    struct MaybeAmount {
        #[serde(default, deserialize_with = "rust_decimal::serde::float_option::deserialize")]
        amount: Option<Decimal>,
    }

    #[test]
    fn test_optional_amount_accepts_string_or_null() {
        let parse = |json: &str| serde_json::from_str::<MaybeAmount>(json).unwrap().amount;
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"amount": null}"#), None);
        assert_eq!(parse(r#"{"amount": "4.20"}"#), Some(dec!(4.2)));
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "amount")]
        amount: Decimal,
    }

    fn parse(json: &str) -> serde_json::Result<Decimal> {
        serde_json::from_str::<Wrapper>(json).map(|w| w.amount)
    }

    #[test]
    fn test_amount_from_number_or_string() {
        assert_eq!(parse(r#"{"amount": 60}"#).unwrap(), dec!(60));
        assert_eq!(parse(r#"{"amount": 12.5}"#).unwrap(), dec!(12.5));
        assert_eq!(parse(r#"{"amount": "12.50"}"#).unwrap(), dec!(12.5));
        assert_eq!(parse(r#"{"amount": "1e2"}"#).unwrap(), dec!(100));
        assert_eq!(parse(r#"{"amount": 0.1}"#).unwrap(), dec!(0.1));
    }

    #[test]
    fn test_amount_rejects_garbage() {
        assert!(parse(r#"{"amount": "twelve"}"#).is_err());
        assert!(parse(r#"{"amount": null}"#).is_err());
        assert!(parse(r#"{"amount": true}"#).is_err());
    }

    #[test]
    fn test_amount_serializes_as_number() {
        let whole = serde_json::to_string(&Wrapper { amount: dec!(30.00) }).unwrap();
        assert_eq!(whole, r#"{"amount":30}"#);

        let fraction = serde_json::to_string(&Wrapper { amount: dec!(33.33) }).unwrap();
        assert_eq!(fraction, r#"{"amount":33.33}"#);
    }

    #[test]
    fn test_round_amount_midpoint() {
        assert_eq!(round_amount(dec!(0.005), 2), dec!(0.01));
        assert_eq!(round_amount(dec!(-0.005), 2), dec!(-0.01));
        assert_eq!(round_amount(dec!(33.333333), 2), dec!(33.33));
        assert_eq!(round_amount(dec!(66.666666), 2), dec!(66.67));
    }

    #[test]
    fn test_parse_amount_scientific() {
        assert_eq!(parse_amount("1e2").unwrap(), dec!(100));
        assert!(parse_amount("").is_err());
    }
}
