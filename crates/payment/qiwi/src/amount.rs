use std::fmt::{Debug, Display};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::QiwiError;

const DECIMALS: u32 = 2;

/// Amount as supplied by the caller. Normalized into a fixed-point string
/// before it goes on the wire.
#[derive(Clone, PartialEq)]
pub enum Amount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Amount {
    /// Fixed-point string with two decimals. Half-cent ties round away from zero.
    pub fn normalize(&self) -> Result<String, QiwiError> {
        let value = match self {
            Amount::Int(value) => Decimal::from(*value),
            Amount::Float(value) => float_to_decimal(*value)
                .ok_or_else(|| QiwiError::InvalidAmount(self.to_string()))?,
            Amount::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(float_to_decimal)
                .ok_or_else(|| QiwiError::InvalidAmount(text.clone()))?,
        };
        let mut rounded =
            value.round_dp_with_strategy(DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DECIMALS);
        Ok(rounded.to_string())
    }
}

// Keeps the binary expansion of the float, so `1.005` stays below the tie.
fn float_to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some(Decimal::ZERO);
    }
    Decimal::from_f64_retain(value)
}

/// Missing amount is sent as zero.
pub fn normalize(amount: Option<&Amount>) -> Result<String, QiwiError> {
    match amount {
        Some(amount) => amount.normalize(),
        None => Amount::Int(0).normalize(),
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Amount::Int(value) => write!(f, "{}", value),
            Amount::Float(value) => write!(f, "{}", value),
            Amount::Text(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Int(value)
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::Int(value as i64)
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount::Int(value as i64)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Float(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_owned())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount::Text(value)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_normalize_int() {
        assert_eq!("1.00", Amount::from(1).normalize().unwrap());
        assert_eq!("0.00", Amount::from(0).normalize().unwrap());
        assert_eq!("-15.00", Amount::from(-15).normalize().unwrap());
        assert_eq!("100500.00", Amount::from(100500u32).normalize().unwrap());
    }

    #[test]
    fn test_normalize_float() {
        assert_eq!("1.00", Amount::from(1.0).normalize().unwrap());
        assert_eq!("1.50", Amount::from(1.5).normalize().unwrap());
        assert_eq!("0.10", Amount::from(0.1).normalize().unwrap());
        assert_eq!("0.11", Amount::from(0.111).normalize().unwrap());
        assert_eq!("123456.78", Amount::from(123456.78).normalize().unwrap());
        assert_eq!("0.13", Amount::from(0.125).normalize().unwrap());
        assert_eq!("10.13", Amount::from(10.125).normalize().unwrap());
        assert_eq!("-10.13", Amount::from(-10.125).normalize().unwrap());
        assert_eq!("1.00", Amount::from(1.005).normalize().unwrap());
        assert_eq!("0.00", Amount::from(-0.0).normalize().unwrap());
    }

    #[test]
    fn test_normalize_str() {
        assert_eq!("1.50", Amount::from("1.5").normalize().unwrap());
        assert_eq!("1.00", Amount::from("1").normalize().unwrap());
        assert_eq!("10.25", Amount::from(" 10.25 ").normalize().unwrap());
        assert_eq!("0.01", Amount::from("0.01").normalize().unwrap());
        assert_eq!("10.13", Amount::from("10.125").normalize().unwrap());
        assert_eq!("0.00", Amount::from("-0").normalize().unwrap());
    }

    #[test]
    fn test_normalize_missing() {
        assert_eq!("0.00", normalize(None).unwrap());
        assert_eq!("2.00", normalize(Some(&Amount::from(2))).unwrap());
    }

    #[test]
    fn test_normalize_invalid() {
        assert!(matches!(
            Amount::from("abc").normalize(),
            Err(QiwiError::InvalidAmount(text)) if text == "abc"
        ));
        assert!(Amount::from("").normalize().is_err());
        assert!(Amount::from(f64::NAN).normalize().is_err());
        assert!(Amount::from(f64::INFINITY).normalize().is_err());
        assert!(Amount::from("inf").normalize().is_err());
        assert!(Amount::from(1e30).normalize().is_err());
    }

    #[test]
    fn test_always_two_decimals() {
        let amounts = [
            Amount::from(7),
            Amount::from(7.1),
            Amount::from(7.129),
            Amount::from("7"),
            Amount::from("7.5"),
            Amount::from("7.555555"),
        ];
        for amount in amounts {
            let normalized = amount.normalize().unwrap();
            let (_, fraction) = normalized.split_once('.').unwrap();
            assert_eq!(fraction.len(), 2, "{}", normalized);
        }
    }
}
