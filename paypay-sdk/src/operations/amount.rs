//! Monetary amounts as decimal text.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PayPayError, Result};

/// A monetary amount, kept as the decimal text the gateway receives.
///
/// Amounts are never converted through floating point, so `"10.50"` stays
/// `"10.50"` on the wire.
///
/// # Example
///
/// ```
/// use paypay_sdk::Amount;
///
/// assert_eq!(Amount::from(1000u64).as_str(), "1000");
/// assert_eq!(Amount::parse("10.50").unwrap().as_str(), "10.50");
/// assert!(Amount::parse("1e3").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Amount(String);

impl Amount {
    /// Parse and validate decimal text such as `"1000"` or `"10.50"`.
    ///
    /// Signs, exponents, separators and surrounding whitespace are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        if !digits(whole) || fraction.is_some_and(|f| !digits(f)) {
            return Err(PayPayError::invalid_request(
                "amount",
                format!("'{}' is not a decimal amount", text),
            ));
        }
        Ok(Self(text.to_string()))
    }

    /// The decimal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the amount is greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0.bytes().any(|b| b.is_ascii_digit() && b != b'0')
    }

    pub(crate) fn ensure_positive(&self, field: &str) -> Result<()> {
        if self.is_positive() {
            Ok(())
        } else {
            Err(PayPayError::invalid_request(field, format!("must be positive, got {}", self.0)))
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl std::str::FromStr for Amount {
    type Err = PayPayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_decimal_text() {
        for text in ["1000", "10.50", "0.01", "007"] {
            assert_eq!(Amount::parse(text).unwrap().as_str(), text);
        }
    }

    #[test]
    fn test_parse_rejects_non_decimal_text() {
        for text in ["", "-5", "+5", "1e3", "1,000", " 10", "10.", ".5", "1.2.3", "abc"] {
            let err = Amount::parse(text).unwrap_err();
            assert!(
                matches!(err, PayPayError::InvalidRequest { ref field, .. } if field == "amount"),
                "{text}"
            );
        }
    }

    #[test]
    fn test_positivity() {
        assert!(Amount::from(1u64).is_positive());
        assert!(Amount::parse("0.01").unwrap().is_positive());
        assert!(!Amount::from(0u64).is_positive());
        assert!(!Amount::parse("0.00").unwrap().is_positive());
        assert!(Amount::from(0u64).ensure_positive("total_amount").is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_value(Amount::from(1000u64)).unwrap();
        assert_eq!(json, serde_json::json!("1000"));

        let parsed: Amount = serde_json::from_value(serde_json::json!("10.50")).unwrap();
        assert_eq!(parsed.to_string(), "10.50");
        assert!(serde_json::from_value::<Amount>(serde_json::json!("ten")).is_err());
    }
}
