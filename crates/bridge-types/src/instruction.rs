//! Instruction payloads handed to the transaction-assembly collaborator.
//!
//! A payload is the tuple the ledger needs to execute one program instruction:
//! the target program, the ordered account references, and the opaque data bytes.
//! The account order is a positional contract with the receiving program.

use crate::{with_0x_prefix, Address};
use serde::{Serialize, Serializer};

/// A single account reference of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountMeta {
	/// Address of the referenced account.
	pub pubkey: Address,
	/// Whether the program may mutate the account.
	pub is_writable: bool,
	/// Whether the account must sign the enclosing transaction.
	pub is_signer: bool,
}

impl AccountMeta {
	pub fn new(pubkey: Address, is_writable: bool, is_signer: bool) -> Self {
		Self {
			pubkey,
			is_writable,
			is_signer,
		}
	}

	/// Writable, non-signing reference.
	pub fn writable(pubkey: Address) -> Self {
		Self::new(pubkey, true, false)
	}

	/// Read-only, non-signing reference.
	pub fn readonly(pubkey: Address) -> Self {
		Self::new(pubkey, false, false)
	}

	/// Read-only signing reference.
	pub fn signer(pubkey: Address) -> Self {
		Self::new(pubkey, false, true)
	}

	/// Writable signing reference (e.g. an account paying for rent).
	pub fn writable_signer(pubkey: Address) -> Self {
		Self::new(pubkey, true, true)
	}
}

/// A fully built program instruction.
///
/// Instances can only be obtained through [`InstructionPayload::new`], which
/// guarantees that both the account list and the data are non-empty. There is
/// no way to mutate a payload after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionPayload {
	program_id: Address,
	accounts: Vec<AccountMeta>,
	#[serde(serialize_with = "serialize_hex")]
	data: Vec<u8>,
}

impl InstructionPayload {
	/// Creates a payload, returning `None` when the account list or the data is empty.
	pub fn new(program_id: Address, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Option<Self> {
		if accounts.is_empty() || data.is_empty() {
			return None;
		}
		Some(Self {
			program_id,
			accounts,
			data,
		})
	}

	pub fn program_id(&self) -> &Address {
		&self.program_id
	}

	pub fn accounts(&self) -> &[AccountMeta] {
		&self.accounts
	}

	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes the payload, returning its parts.
	pub fn into_parts(self) -> (Address, Vec<AccountMeta>, Vec<u8>) {
		(self.program_id, self.accounts, self.data)
	}
}

fn serialize_hex<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&with_0x_prefix(&hex::encode(data)))
}
