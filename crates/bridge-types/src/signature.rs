//! Recoverable secp256k1 signatures in the `r ‖ s ‖ recovery_id` wire layout.

use crate::{with_0x_prefix, without_0x_prefix};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Length in bytes of a recoverable signature on the wire.
pub const SIGNATURE_LENGTH: usize = 65;

/// A 65-byte recoverable ECDSA signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecoverableSignature([u8; SIGNATURE_LENGTH]);

impl RecoverableSignature {
	/// Assembles a signature from its 64-byte `r ‖ s` body and a recovery id.
	pub fn from_parts(rs: &[u8; 64], recovery_id: u8) -> Self {
		let mut bytes = [0u8; SIGNATURE_LENGTH];
		bytes[..64].copy_from_slice(rs);
		bytes[64] = recovery_id;
		Self(bytes)
	}

	pub fn r(&self) -> &[u8] {
		&self.0[..32]
	}

	pub fn s(&self) -> &[u8] {
		&self.0[32..64]
	}

	pub fn recovery_id(&self) -> u8 {
		self.0[64]
	}

	pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
		&self.0
	}
}

impl From<[u8; SIGNATURE_LENGTH]> for RecoverableSignature {
	fn from(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
		Self(bytes)
	}
}

impl fmt::Debug for RecoverableSignature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RecoverableSignature({})", hex::encode(self.0))
	}
}

impl Serialize for RecoverableSignature {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&with_0x_prefix(&hex::encode(self.0)))
	}
}

impl<'de> Deserialize<'de> for RecoverableSignature {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		let bytes = hex::decode(without_0x_prefix(&s)).map_err(serde::de::Error::custom)?;
		let raw: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
			serde::de::Error::custom(format!(
				"expected {} signature bytes, got {}",
				SIGNATURE_LENGTH,
				b.len()
			))
		})?;
		Ok(Self(raw))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parts_land_in_wire_positions() {
		let mut rs = [0u8; 64];
		rs[0] = 0xaa;
		rs[63] = 0xbb;
		let sig = RecoverableSignature::from_parts(&rs, 1);

		assert_eq!(sig.r()[0], 0xaa);
		assert_eq!(sig.s()[31], 0xbb);
		assert_eq!(sig.recovery_id(), 1);
		assert_eq!(sig.as_bytes().len(), SIGNATURE_LENGTH);
	}

	#[test]
	fn test_deserialize_rejects_short_signature() {
		let result: Result<RecoverableSignature, _> = serde_json::from_str("\"0x0102\"");
		assert!(result.is_err());
	}
}
