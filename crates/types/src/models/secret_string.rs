//! API key holder that wipes its buffer on drop

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Provider API key or other credential
///
/// The value never appears in `Debug` or `Display` output, so endpoints and
/// provider configs can be logged without leaking keys. Not serializable.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: impl Into<String>) -> Self {
		Self {
			inner: secret.into(),
		}
	}

	/// Raw value, for building request headers only
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString([REDACTED])")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret)
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		let (a, b) = (self.inner.as_bytes(), other.inner.as_bytes());
		if a.len() != b.len() {
			return false;
		}
		a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
	}
}

impl Eq for SecretString {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_expose_secret() {
		let key = SecretString::new("zerox-key");
		assert_eq!(key.expose_secret(), "zerox-key");
		assert!(!key.is_empty());
		assert!(SecretString::new("   ").is_empty());
	}

	#[test]
	fn test_secret_is_redacted_in_formatting() {
		let key = SecretString::from("super-secret");
		assert!(!format!("{:?}", key).contains("super-secret"));
		assert_eq!(key.to_string(), "[REDACTED]");
	}

	#[test]
	fn test_equality() {
		assert_eq!(SecretString::from("a"), SecretString::from("a"));
		assert_ne!(SecretString::from("a"), SecretString::from("b"));
		assert_ne!(SecretString::from("a"), SecretString::from("ab"));
	}
}
