//! Token amounts carried as raw integer strings
//!
//! Providers report amounts in the output token's smallest unit as decimal
//! strings. They are kept as strings for display and only parsed into a
//! 256-bit integer when compared or handed to the on-chain verifier.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors raised when an amount string cannot be interpreted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
	#[error("amount is empty")]
	Empty,
	#[error("amount must contain only digits: {value}")]
	InvalidDigits { value: String },
	#[error("amount does not fit in 256 bits: {value}")]
	Overflow { value: String },
}

/// Raw integer amount in a token's smallest unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Amount(String);

impl Amount {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Validate that the string contains only ASCII digits
	pub fn validate(&self) -> Result<(), AmountError> {
		if self.0.is_empty() {
			return Err(AmountError::Empty);
		}
		if !self.0.chars().all(|c| c.is_ascii_digit()) {
			return Err(AmountError::InvalidDigits {
				value: self.0.clone(),
			});
		}
		Ok(())
	}

	/// Parse into a 256-bit unsigned integer
	pub fn to_u256(&self) -> Result<U256, AmountError> {
		self.validate()?;
		U256::from_str_radix(&self.0, 10).map_err(|_| AmountError::Overflow {
			value: self.0.clone(),
		})
	}

	/// Numeric zero test, `"000"` is zero
	pub fn is_zero(&self) -> bool {
		!self.0.is_empty() && self.0.chars().all(|c| c == '0')
	}

	/// Numeric ordering; values that do not parse compare as zero
	pub fn cmp_numeric(&self, other: &Amount) -> Ordering {
		let lhs = self.to_u256().unwrap_or(U256::ZERO);
		let rhs = other.to_u256().unwrap_or(U256::ZERO);
		lhs.cmp(&rhs)
	}

	/// Render as a fixed-point decimal with exactly `decimals` fractional digits
	///
	/// `Amount::new("1500000").to_decimal_string(6)` yields `"1.500000"`.
	pub fn to_decimal_string(&self, decimals: u8) -> Result<String, AmountError> {
		self.validate()?;
		let digits = self.0.trim_start_matches('0');
		let decimals = decimals as usize;

		if decimals == 0 {
			return Ok(if digits.is_empty() {
				"0".to_string()
			} else {
				digits.to_string()
			});
		}

		let padded = format!("{:0>width$}", digits, width = decimals + 1);
		let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
		Ok(format!("{}.{}", int_part, frac_part))
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for Amount {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for Amount {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<U256> for Amount {
	fn from(value: U256) -> Self {
		Self(value.to_string())
	}
}

// Serialized as a bare string so API payloads keep full precision
impl Serialize for Amount {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Amount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		let amount = Self(value);
		amount.validate().map_err(serde::de::Error::custom)?;
		Ok(amount)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_amount_validation() {
		assert!(Amount::new("1234567890").validate().is_ok());
		assert_eq!(Amount::new("").validate(), Err(AmountError::Empty));
		assert!(matches!(
			Amount::new("12a").validate(),
			Err(AmountError::InvalidDigits { .. })
		));
	}

	#[test]
	fn test_amount_is_zero() {
		assert!(Amount::new("0").is_zero());
		assert!(Amount::new("000").is_zero());
		assert!(!Amount::new("10").is_zero());
		assert!(!Amount::new("").is_zero());
	}

	#[test]
	fn test_to_u256_handles_large_values() {
		let amount = Amount::new("115792089237316195423570985008687907853269984665640564039457584007913129639935");
		assert_eq!(amount.to_u256().unwrap(), U256::MAX);

		let too_big = Amount::new("115792089237316195423570985008687907853269984665640564039457584007913129639936");
		assert!(matches!(too_big.to_u256(), Err(AmountError::Overflow { .. })));
	}

	#[test]
	fn test_cmp_numeric_is_not_lexical() {
		assert_eq!(Amount::new("9").cmp_numeric(&Amount::new("10")), Ordering::Less);
		assert_eq!(Amount::new("100").cmp_numeric(&Amount::new("150")), Ordering::Less);
		assert_eq!(Amount::new("0042").cmp_numeric(&Amount::new("42")), Ordering::Equal);
	}

	#[test]
	fn test_cmp_numeric_treats_invalid_as_zero() {
		assert_eq!(Amount::new("").cmp_numeric(&Amount::new("0")), Ordering::Equal);
		assert_eq!(Amount::new("abc").cmp_numeric(&Amount::new("1")), Ordering::Less);
	}

	#[test]
	fn test_to_decimal_string() {
		assert_eq!(Amount::new("1500000").to_decimal_string(6).unwrap(), "1.500000");
		assert_eq!(Amount::new("1").to_decimal_string(18).unwrap(), "0.000000000000000001");
		assert_eq!(Amount::new("1000000000000000000").to_decimal_string(18).unwrap(), "1.000000000000000000");
		assert_eq!(Amount::new("0").to_decimal_string(2).unwrap(), "0.00");
		assert_eq!(Amount::new("0042").to_decimal_string(0).unwrap(), "42");
		assert!(Amount::new("1.5").to_decimal_string(6).is_err());
	}

	#[test]
	fn test_amount_serde() {
		let amount: Amount = serde_json::from_str("\"987654\"").unwrap();
		assert_eq!(amount.as_str(), "987654");
		assert_eq!(serde_json::to_string(&amount).unwrap(), "\"987654\"");
		assert!(serde_json::from_str::<Amount>("\"-1\"").is_err());
	}
}
