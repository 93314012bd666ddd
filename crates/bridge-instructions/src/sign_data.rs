//! Canonical message signed by every custodian for a withdrawal.
//!
//! The on-chain verifier rebuilds this message from the instruction amounts, the
//! recipient accounts it was handed and its stored nonce, serializes it with
//! `serde_json` and hashes the bytes with Keccak-256. Off-chain signers must
//! produce the identical bytes, so the message is serialized the same way:
//!
//! ```text
//! {"amounts":[10000000,10000000],"accounts":[[130,130,...],[123,130,...]],"nonce":0}
//! ```
//!
//! Keys appear in the order `amounts`, `accounts`, `nonce`; each account is the
//! array of its 32 raw byte values; there is no whitespace anywhere.

use crate::BridgeError;
use alloy_primitives::{keccak256, B256};
use bridge_types::Address;
use serde::{Serialize, Serializer};

// `{"amounts":[],"accounts":[],"nonce":}`
const FRAME_LEN: usize = 37;
// 20 digits + separator
const MAX_AMOUNT_LEN: usize = 21;
// 32 * "255," + brackets + separator
const MAX_ACCOUNT_LEN: usize = 32 * 4 + 2;
const MAX_NONCE_LEN: usize = 20;

/// Borrowed view of the values covered by the custodian signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignData<'a> {
	/// Per-recipient amounts, in instruction order.
	pub amounts: &'a [u64],
	/// Recipient accounts, rendered as arrays of their raw bytes.
	#[serde(serialize_with = "serialize_raw_accounts")]
	pub accounts: &'a [Address],
	/// Replay-protection nonce read from the nonce state account.
	pub nonce: u64,
}

impl<'a> SignData<'a> {
	pub fn new(amounts: &'a [u64], accounts: &'a [Address], nonce: u64) -> Self {
		Self {
			amounts,
			accounts,
			nonce,
		}
	}

	/// Serializes the message into its canonical byte form.
	pub fn canonical_bytes(&self) -> Result<Vec<u8>, BridgeError> {
		let capacity = FRAME_LEN
			+ self.amounts.len() * MAX_AMOUNT_LEN
			+ self.accounts.len() * MAX_ACCOUNT_LEN
			+ MAX_NONCE_LEN;
		let mut buf = Vec::with_capacity(capacity);
		serde_json::to_writer(&mut buf, self)
			.map_err(|e| BridgeError::SignDataEncoding(e.to_string()))?;
		Ok(buf)
	}

	/// Keccak-256 digest of the canonical bytes: the hash every custodian signs.
	pub fn digest(&self) -> Result<B256, BridgeError> {
		Ok(keccak256(self.canonical_bytes()?))
	}
}

fn serialize_raw_accounts<S>(accounts: &&[Address], serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.collect_seq(accounts.iter().map(Address::as_bytes))
}
