//! 32-byte ledger addresses.
//!
//! Program ids, state accounts, token accounts and withdraw recipients all share
//! this representation. The textual form is base58, which is what operators paste
//! into configuration files and requests.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length in bytes of a ledger address.
pub const ADDRESS_LENGTH: usize = 32;

/// Errors that can occur when parsing an address from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
	#[error("Invalid base58 encoding: {0}")]
	InvalidEncoding(String),
	#[error("Invalid address length: expected {ADDRESS_LENGTH} bytes, got {0}")]
	InvalidLength(usize),
}

/// A 32-byte ledger address.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
	/// Creates an address from its raw bytes.
	pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
		Self(bytes)
	}

	/// Returns the raw bytes of the address.
	pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
		&self.0
	}

	/// Returns a copy of the raw bytes of the address.
	pub fn to_bytes(self) -> [u8; ADDRESS_LENGTH] {
		self.0
	}

	/// Builds an address from a byte slice that must be exactly 32 bytes long.
	pub fn try_from_slice(bytes: &[u8]) -> Result<Self, AddressParseError> {
		let raw: [u8; ADDRESS_LENGTH] = bytes
			.try_into()
			.map_err(|_| AddressParseError::InvalidLength(bytes.len()))?;
		Ok(Self(raw))
	}
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
	fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
		Self(bytes)
	}
}

impl From<Address> for [u8; ADDRESS_LENGTH] {
	fn from(address: Address) -> Self {
		address.0
	}
}

impl AsRef<[u8]> for Address {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl FromStr for Address {
	type Err = AddressParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let decoded = bs58::decode(s.trim())
			.into_vec()
			.map_err(|e| AddressParseError::InvalidEncoding(e.to_string()))?;
		Self::try_from_slice(&decoded)
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", bs58::encode(self.0).into_string())
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Address({})", self)
	}
}

impl Serialize for Address {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_system_program_round_trips_through_base58() {
		let address: Address = "11111111111111111111111111111111".parse().unwrap();
		assert_eq!(address, Address::default());
		assert_eq!(address.to_string(), "11111111111111111111111111111111");
	}

	#[test]
	fn test_parse_rejects_wrong_length() {
		let short = bs58::encode([1u8, 2, 3]).into_string();
		let err = short.parse::<Address>().unwrap_err();
		assert_eq!(err, AddressParseError::InvalidLength(3));
	}

	#[test]
	fn test_parse_rejects_non_base58() {
		let err = "0OIl".parse::<Address>().unwrap_err();
		assert!(matches!(err, AddressParseError::InvalidEncoding(_)));
	}

	#[test]
	fn test_serde_uses_base58_string() {
		let address = Address::new([7u8; 32]);
		let json = serde_json::to_string(&address).unwrap();
		assert_eq!(json, format!("\"{}\"", address));

		let back: Address = serde_json::from_str(&json).unwrap();
		assert_eq!(back, address);
	}
}
