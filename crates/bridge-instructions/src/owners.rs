//! Owner-set instruction: one-time registration of the custodian public keys.
//!
//! Wire format: `0x02 ‖ owner_count (u8) ‖ owner_1 ‖ owner_2 ‖ ...`. Every key has
//! the same, contract-defined length (64 bytes for the deployed program).

use crate::{BridgeError, InstructionTag, MAX_WIRE_COUNT};
use bridge_types::{AccountMeta, Address, InstructionPayload};
use tracing::instrument;

/// Semantic parameters of the custodian-set initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSetRequest {
	/// Raw custodian public keys, in the order the verifier matches signatures.
	pub owners: Vec<Vec<u8>>,
	pub program_id: Address,
	pub accounts: Vec<AccountMeta>,
}

impl OwnerSetRequest {
	pub fn new(owners: Vec<Vec<u8>>, program_id: Address, accounts: Vec<AccountMeta>) -> Self {
		Self {
			owners,
			program_id,
			accounts,
		}
	}

	/// Builds the owner-set instruction.
	///
	/// The encoder is stateless: it does not know whether the program was already
	/// initialized. The program itself rejects a second initialization.
	#[instrument(skip_all, fields(owners = self.owners.len()))]
	pub fn build_instruction(&self) -> Result<InstructionPayload, BridgeError> {
		let key_len = match self.owners.first() {
			Some(first) => first.len(),
			None => return Err(BridgeError::InvalidOwnerList("owner list is empty".into())),
		};
		if self.accounts.is_empty() {
			return Err(BridgeError::InvalidAccountList(
				"owner initialization requires at least one account".into(),
			));
		}
		if self.owners.len() > MAX_WIRE_COUNT {
			return Err(BridgeError::TooManyOwners {
				count: self.owners.len(),
				max: MAX_WIRE_COUNT,
			});
		}
		if key_len == 0 {
			return Err(BridgeError::InvalidOwnerList("owner key is empty".into()));
		}
		if let Some(index) = self.owners.iter().position(|owner| owner.len() != key_len) {
			return Err(BridgeError::InvalidOwnerList(format!(
				"owner {} has {} bytes, expected {}",
				index,
				self.owners[index].len(),
				key_len
			)));
		}

		let mut data = Vec::with_capacity(2 + key_len * self.owners.len());
		data.push(InstructionTag::InitOwners.as_byte());
		data.push(self.owners.len() as u8);
		for owner in &self.owners {
			data.extend_from_slice(owner);
		}

		tracing::debug!(data_len = data.len(), key_len, "Encoded owner set");

		InstructionPayload::new(self.program_id, self.accounts.clone(), data).ok_or_else(|| {
			BridgeError::AccountSliceConstructionFailure("empty owner-set payload".into())
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn accounts() -> Vec<AccountMeta> {
		vec![
			AccountMeta::writable(Address::new([1u8; 32])),
			AccountMeta::writable(Address::new([2u8; 32])),
			AccountMeta::writable_signer(Address::new([3u8; 32])),
			AccountMeta::readonly(Address::default()),
		]
	}

	fn owners(count: usize) -> Vec<Vec<u8>> {
		(0..count).map(|i| vec![(i % 256) as u8; 64]).collect()
	}

	#[test]
	fn test_owner_set_layout() {
		let request = OwnerSetRequest::new(owners(3), Address::default(), accounts());
		let payload = request.build_instruction().unwrap();
		let data = payload.data();

		assert_eq!(data.len(), 2 + 3 * 64);
		assert_eq!(data[0], 0x02);
		assert_eq!(data[1], 3);
		assert_eq!(&data[2..66], &[0u8; 64]);
		assert_eq!(&data[66..130], &[1u8; 64]);
		assert_eq!(&data[130..], &[2u8; 64]);
	}

	#[test]
	fn test_owner_count_byte_matches_list_length() {
		for count in [1, 2, 20, 254, 255] {
			let request = OwnerSetRequest::new(owners(count), Address::default(), accounts());
			let payload = request.build_instruction().unwrap();
			assert_eq!(payload.data()[1] as usize, count);
		}
	}

	#[test]
	fn test_more_than_255_owners_fails_instead_of_wrapping() {
		for count in [256, 300, 511] {
			let request = OwnerSetRequest::new(owners(count), Address::default(), accounts());
			assert_eq!(
				request.build_instruction(),
				Err(BridgeError::TooManyOwners { count, max: 255 })
			);
		}
	}

	#[test]
	fn test_rejects_empty_owner_list() {
		let request = OwnerSetRequest::new(vec![], Address::default(), accounts());
		assert!(matches!(
			request.build_instruction(),
			Err(BridgeError::InvalidOwnerList(_))
		));
	}

	#[test]
	fn test_rejects_empty_account_list() {
		let request = OwnerSetRequest::new(owners(2), Address::default(), vec![]);
		assert!(matches!(
			request.build_instruction(),
			Err(BridgeError::InvalidAccountList(_))
		));
	}

	#[test]
	fn test_rejects_mixed_key_lengths() {
		let mut keys = owners(2);
		keys.push(vec![0u8; 65]);
		let request = OwnerSetRequest::new(keys, Address::default(), accounts());
		assert!(matches!(
			request.build_instruction(),
			Err(BridgeError::InvalidOwnerList(_))
		));
	}

	#[test]
	fn test_accepts_65_byte_keys() {
		let keys = vec![vec![4u8; 65], vec![5u8; 65]];
		let request = OwnerSetRequest::new(keys, Address::default(), accounts());
		assert_eq!(request.build_instruction().unwrap().data().len(), 2 + 2 * 65);
	}
}
