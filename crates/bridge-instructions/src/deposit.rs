//! Deposit instruction: lock tokens in the vault for delivery on the destination chain.
//!
//! Wire format: `0x00 ‖ amount (u64 LE) ‖ destination address (raw UTF-8 bytes)`.
//! The destination is carried opaquely; only its length is checked.

use crate::{BridgeError, InstructionTag};
use bridge_types::{AccountMeta, Address, InstructionPayload};
use tracing::instrument;

/// Length of a `0x`-prefixed, 20-byte hex destination-chain address.
pub const DESTINATION_ADDRESS_LENGTH: usize = 42;

/// Semantic parameters of a deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositRequest {
	/// Destination-chain address, e.g. `0xdafea492d9c6733ae3d56b7ed1adb60692c98bc5`.
	pub destination: String,
	/// Amount in the token's base units.
	pub amount: u64,
	pub program_id: Address,
	pub accounts: Vec<AccountMeta>,
}

impl DepositRequest {
	pub fn new(
		destination: impl Into<String>,
		amount: u64,
		program_id: Address,
		accounts: Vec<AccountMeta>,
	) -> Self {
		Self {
			destination: destination.into(),
			amount,
			program_id,
			accounts,
		}
	}

	/// Builds the deposit instruction.
	#[instrument(skip_all, fields(amount = self.amount))]
	pub fn build_instruction(&self) -> Result<InstructionPayload, BridgeError> {
		let destination = self.destination.as_bytes();
		if destination.len() != DESTINATION_ADDRESS_LENGTH {
			return Err(BridgeError::InvalidAddressFormat {
				expected: DESTINATION_ADDRESS_LENGTH,
				actual: destination.len(),
			});
		}
		if self.accounts.is_empty() {
			return Err(BridgeError::InvalidAccountList(
				"deposit requires at least one account".into(),
			));
		}

		let mut data = Vec::with_capacity(1 + 8 + destination.len());
		data.push(InstructionTag::Deposit.as_byte());
		data.extend_from_slice(&self.amount.to_le_bytes());
		data.extend_from_slice(destination);

		tracing::debug!(data_len = data.len(), "Encoded deposit");

		InstructionPayload::new(self.program_id, self.accounts.clone(), data).ok_or_else(|| {
			BridgeError::AccountSliceConstructionFailure("empty deposit payload".into())
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DESTINATION: &str = "0xdafea492d9c6733ae3d56b7ed1adb60692c98bc5";

	fn accounts() -> Vec<AccountMeta> {
		vec![
			AccountMeta::writable(Address::new([1u8; 32])),
			AccountMeta::writable(Address::new([2u8; 32])),
			AccountMeta::readonly(Address::new([3u8; 32])),
			AccountMeta::signer(Address::new([4u8; 32])),
			AccountMeta::readonly(Address::new([5u8; 32])),
		]
	}

	#[test]
	fn test_deposit_layout() {
		let request = DepositRequest::new(DESTINATION, 100_000_000, Address::new([9u8; 32]), accounts());
		let payload = request.build_instruction().unwrap();
		let data = payload.data();

		assert_eq!(data.len(), 1 + 8 + 42);
		assert_eq!(data[0], 0x00);
		assert_eq!(&data[1..9], &100_000_000u64.to_le_bytes());
		assert_eq!(&data[9..], DESTINATION.as_bytes());
		assert_eq!(payload.program_id(), &Address::new([9u8; 32]));
		assert_eq!(payload.accounts(), accounts().as_slice());
	}

	#[test]
	fn test_amount_round_trips() {
		for amount in [0, 1, 255, 256, 1 << 32, u64::MAX - 1, u64::MAX] {
			let request = DepositRequest::new(DESTINATION, amount, Address::default(), accounts());
			let payload = request.build_instruction().unwrap();
			let decoded = u64::from_le_bytes(payload.data()[1..9].try_into().unwrap());
			assert_eq!(decoded, amount);
		}
	}

	#[test]
	fn test_rejects_wrong_address_length() {
		for destination in ["", "0x", &DESTINATION[..41], &format!("{}0", DESTINATION)] {
			let request = DepositRequest::new(destination, 1, Address::default(), accounts());
			assert_eq!(
				request.build_instruction(),
				Err(BridgeError::InvalidAddressFormat {
					expected: 42,
					actual: destination.len(),
				})
			);
		}
	}

	#[test]
	fn test_address_content_is_not_validated() {
		// Only the length is part of the contract.
		let opaque = "z".repeat(42);
		let request = DepositRequest::new(opaque.clone(), 7, Address::default(), accounts());
		let payload = request.build_instruction().unwrap();
		assert_eq!(&payload.data()[9..], opaque.as_bytes());
	}

	#[test]
	fn test_rejects_empty_account_list() {
		let request = DepositRequest::new(DESTINATION, 1, Address::default(), vec![]);
		assert!(matches!(
			request.build_instruction(),
			Err(BridgeError::InvalidAccountList(_))
		));
	}
}
