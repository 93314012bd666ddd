//! Error taxonomy of the instruction encoders.
//!
//! All variants are deterministic local failures: retrying with the same input
//! yields the same error. Ledger submission failures are a separate category and
//! never appear here.

use thiserror::Error;

/// Errors that can occur while building or decoding bridge instructions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
	/// The destination-chain address does not have the expected length.
	#[error("Invalid destination address: expected {expected} characters, got {actual}")]
	InvalidAddressFormat { expected: usize, actual: usize },
	/// The account list handed to an encoder is unusable.
	#[error("Invalid account list: {0}")]
	InvalidAccountList(String),
	/// The custodian public key list is empty or malformed.
	#[error("Invalid owner list: {0}")]
	InvalidOwnerList(String),
	/// More custodians than the single-byte owner count can express.
	#[error("Too many owners: {count} (max {max})")]
	TooManyOwners { count: usize, max: usize },
	/// Amounts and destination addresses do not correspond one to one.
	#[error("Length mismatch: {amounts} amounts for {addresses} destination addresses")]
	LengthMismatch { amounts: usize, addresses: usize },
	/// A withdrawal without any amount.
	#[error("Withdraw list is empty")]
	EmptyWithdrawList,
	/// More recipients than the single-byte amount count can express.
	#[error("Too many recipients: {count} (max {max})")]
	TooManyRecipients { count: usize, max: usize },
	/// A withdrawal without any custodian key.
	#[error("No custodian signing keys supplied")]
	NoCustodianKeys,
	/// More custodian keys than the single-byte signer count can express.
	#[error("Too many signers: {count} (max {max})")]
	TooManySigners { count: usize, max: usize },
	/// A custodian key could not be decoded into a secp256k1 scalar.
	#[error("Invalid signing key at position {index}: {reason}")]
	InvalidSigningKey { index: usize, reason: String },
	/// Signing with a decoded custodian key failed.
	#[error("Signing failed for key at position {index}: {reason}")]
	SigningFailure { index: usize, reason: String },
	/// The signature set handed to assembly does not match the custodian key set.
	#[error("Signature count mismatch: expected {expected}, got {actual}")]
	SignatureCountMismatch { expected: usize, actual: usize },
	/// The canonical sign message could not be serialized.
	#[error("Failed to encode sign data: {0}")]
	SignDataEncoding(String),
	/// The final payload could not be assembled from its parts.
	#[error("Failed to construct account slice: {0}")]
	AccountSliceConstructionFailure(String),
	/// Instruction data does not follow the wire format.
	#[error("Failed to decode instruction: {0}")]
	Decode(String),
}
