//! Custodian signing seam.
//!
//! Encoders never touch key material directly: they hand each custodian key and
//! the sign hash to a [`DigestSigner`]. [`LocalSigner`] is the production signer;
//! tests substitute instrumented signers through the same trait.

use alloy_primitives::B256;
use bridge_types::{without_0x_prefix, CustodianKey, RecoverableSignature};
use k256::ecdsa::SigningKey;
use thiserror::Error;
use zeroize::Zeroizing;

/// Length in bytes of a secp256k1 secret scalar.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length in bytes of a custodian public key as registered with the program.
pub const PUBLIC_KEY_LENGTH: usize = 64;

/// Errors raised by a signer for a single key. Messages never include key material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignerError {
	#[error("{0}")]
	InvalidKey(String),
	#[error("{0}")]
	Signing(String),
}

/// Produces a recoverable signature over a 32-byte prehashed digest.
#[cfg_attr(test, mockall::automock)]
pub trait DigestSigner: Send + Sync {
	fn sign_digest(
		&self,
		key: &CustodianKey,
		digest: &B256,
	) -> Result<RecoverableSignature, SignerError>;
}

/// Signs in-process with `k256`, using RFC 6979 deterministic nonces.
///
/// Signatures are low-s normalized and carry a recovery id of 0 or 1, the form
/// the on-chain `secp256k1_recover` expects.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSigner;

impl DigestSigner for LocalSigner {
	fn sign_digest(
		&self,
		key: &CustodianKey,
		digest: &B256,
	) -> Result<RecoverableSignature, SignerError> {
		let signing_key = decode_signing_key(key)?;
		let (signature, recovery_id) = signing_key
			.sign_prehash_recoverable(digest.as_slice())
			.map_err(|e| SignerError::Signing(e.to_string()))?;

		let mut rs = [0u8; 64];
		rs.copy_from_slice(&signature.to_bytes());
		Ok(RecoverableSignature::from_parts(&rs, recovery_id.to_byte()))
	}
}

/// Decodes a hex-encoded secret scalar (optionally `0x`-prefixed) into a signing key.
pub fn decode_signing_key(key: &CustodianKey) -> Result<SigningKey, SignerError> {
	key.with_exposed(|hex_key| {
		let bytes = Zeroizing::new(
			hex::decode(without_0x_prefix(hex_key))
				.map_err(|_| SignerError::InvalidKey("key is not valid hex".into()))?,
		);
		if bytes.len() != SECRET_KEY_LENGTH {
			return Err(SignerError::InvalidKey(format!(
				"expected {} key bytes, got {}",
				SECRET_KEY_LENGTH,
				bytes.len()
			)));
		}
		SigningKey::from_slice(&bytes)
			.map_err(|_| SignerError::InvalidKey("key is not a valid secp256k1 scalar".into()))
	})
}

/// Derives the owner entry registered on-chain for a custodian key: the
/// uncompressed public key without its leading `0x04` tag.
pub fn custodian_public_key(key: &CustodianKey) -> Result<[u8; PUBLIC_KEY_LENGTH], SignerError> {
	let signing_key = decode_signing_key(key)?;
	let point = signing_key.verifying_key().to_encoded_point(false);

	let mut public_key = [0u8; PUBLIC_KEY_LENGTH];
	public_key.copy_from_slice(&point.as_bytes()[1..]);
	Ok(public_key)
}
