//! Custodian signing key material.
//!
//! Keys are hex-encoded secp256k1 scalars. They are held in zeroizing memory for
//! exactly as long as the owning request lives and are never rendered in logs,
//! debug output, or serialized configuration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

const REDACTED: &str = "***REDACTED***";

/// A hex-encoded custodian signing key that is wiped from memory on drop.
#[derive(Clone)]
pub struct CustodianKey(Zeroizing<String>);

impl CustodianKey {
	pub fn new(hex_key: String) -> Self {
		Self(Zeroizing::new(hex_key))
	}

	/// Runs `f` with the hex key, limiting the scope in which the secret is visible.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&str) -> R,
	{
		f(self.0.trim())
	}

	pub fn is_empty(&self) -> bool {
		self.0.trim().is_empty()
	}
}

impl fmt::Debug for CustodianKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "CustodianKey({})", REDACTED)
	}
}

impl fmt::Display for CustodianKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<&str> for CustodianKey {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

impl From<String> for CustodianKey {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

// Serialized form is always redacted; keys only ever flow inward from config.
impl Serialize for CustodianKey {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for CustodianKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(Self::new(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const KEY: &str = "aad53b70ad9ed01b75238533dd6b395f4d300427da0165aafbd42ea7a606601f";

	#[test]
	fn test_key_never_appears_in_text_forms() {
		let key = CustodianKey::from(KEY);

		let debug = format!("{:?}", key);
		let display = format!("{}", key);
		let json = serde_json::to_string(&key).unwrap();

		for rendered in [debug, display, json] {
			assert!(!rendered.contains(KEY));
			assert!(rendered.contains(REDACTED));
		}
	}

	#[test]
	fn test_with_exposed_trims_whitespace() {
		let key = CustodianKey::from(format!("  {}\n", KEY));
		assert_eq!(key.with_exposed(|k| k.to_string()), KEY);
		assert!(!key.is_empty());
		assert!(CustodianKey::from("   ").is_empty());
	}

	#[test]
	fn test_deserializes_from_plain_string() {
		let key: CustodianKey = serde_json::from_str(&format!("\"{}\"", KEY)).unwrap();
		key.with_exposed(|k| assert_eq!(k, KEY));
	}
}
