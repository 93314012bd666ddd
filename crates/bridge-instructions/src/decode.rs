//! Decoding of instruction data back into its semantic parts.
//!
//! Mirrors the program's own unpacker so encoded payloads can be inspected and
//! checked end to end. Decoding is strict: every byte must be consumed.

use crate::{BridgeError, InstructionTag, DESTINATION_ADDRESS_LENGTH};
use bridge_types::{RecoverableSignature, SIGNATURE_LENGTH};

/// A decoded bridge instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeInstruction {
	Deposit {
		amount: u64,
		destination: String,
	},
	Withdraw {
		amounts: Vec<u64>,
		signatures: Vec<RecoverableSignature>,
	},
	InitOwners {
		owners: Vec<Vec<u8>>,
	},
}

impl BridgeInstruction {
	/// Decodes instruction data. `owner_key_len` is the per-key length of the
	/// owner set, which the wire format does not carry.
	pub fn unpack(input: &[u8], owner_key_len: usize) -> Result<Self, BridgeError> {
		let mut reader = Reader::new(input);
		let tag = InstructionTag::try_from(reader.u8()?)?;

		let instruction = match tag {
			InstructionTag::Deposit => {
				let amount = reader.u64()?;
				let raw = reader.take(DESTINATION_ADDRESS_LENGTH)?;
				let destination = String::from_utf8(raw.to_vec())
					.map_err(|_| BridgeError::Decode("destination is not valid UTF-8".into()))?;
				Self::Deposit {
					amount,
					destination,
				}
			},
			InstructionTag::Withdraw => {
				let amount_count = reader.u8()? as usize;
				let amounts = (0..amount_count)
					.map(|_| reader.u64())
					.collect::<Result<Vec<_>, _>>()?;

				let signer_count = reader.u8()? as usize;
				let mut signatures = Vec::with_capacity(signer_count);
				for _ in 0..signer_count {
					let mut bytes = [0u8; SIGNATURE_LENGTH];
					bytes.copy_from_slice(reader.take(SIGNATURE_LENGTH)?);
					signatures.push(RecoverableSignature::from(bytes));
				}
				Self::Withdraw {
					amounts,
					signatures,
				}
			},
			InstructionTag::InitOwners => {
				if owner_key_len == 0 {
					return Err(BridgeError::Decode("owner key length must be non-zero".into()));
				}
				let owner_count = reader.u8()? as usize;
				let owners = (0..owner_count)
					.map(|_| reader.take(owner_key_len).map(<[u8]>::to_vec))
					.collect::<Result<Vec<_>, _>>()?;
				Self::InitOwners { owners }
			},
		};

		reader.finish()?;
		Ok(instruction)
	}

	pub fn tag(&self) -> InstructionTag {
		match self {
			Self::Deposit { .. } => InstructionTag::Deposit,
			Self::Withdraw { .. } => InstructionTag::Withdraw,
			Self::InitOwners { .. } => InstructionTag::InitOwners,
		}
	}
}

struct Reader<'a> {
	input: &'a [u8],
	offset: usize,
}

impl<'a> Reader<'a> {
	fn new(input: &'a [u8]) -> Self {
		Self { input, offset: 0 }
	}

	fn take(&mut self, len: usize) -> Result<&'a [u8], BridgeError> {
		let end = self
			.offset
			.checked_add(len)
			.filter(|end| *end <= self.input.len())
			.ok_or_else(|| {
				BridgeError::Decode(format!(
					"truncated input: need {} bytes at offset {}, have {}",
					len,
					self.offset,
					self.input.len() - self.offset
				))
			})?;
		let bytes = &self.input[self.offset..end];
		self.offset = end;
		Ok(bytes)
	}

	fn u8(&mut self) -> Result<u8, BridgeError> {
		Ok(self.take(1)?[0])
	}

	fn u64(&mut self) -> Result<u64, BridgeError> {
		let mut bytes = [0u8; 8];
		bytes.copy_from_slice(self.take(8)?);
		Ok(u64::from_le_bytes(bytes))
	}

	fn finish(&self) -> Result<(), BridgeError> {
		let remaining = self.input.len() - self.offset;
		if remaining != 0 {
			return Err(BridgeError::Decode(format!(
				"{} trailing bytes",
				remaining
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{DepositRequest, OwnerSetRequest, PreparedWithdraw, WithdrawRequest};
	use bridge_types::{AccountMeta, Address};

	const DESTINATION: &str = "0xdafea492d9c6733ae3d56b7ed1adb60692c98bc5";

	fn accounts() -> Vec<AccountMeta> {
		vec![AccountMeta::writable(Address::new([1u8; 32]))]
	}

	fn prepared(amounts: Vec<u64>, signers: usize) -> PreparedWithdraw {
		let request = WithdrawRequest {
			custodian_keys: (0..signers).map(|_| "00".into()).collect(),
			destinations: vec![Address::default(); amounts.len()],
			amounts,
			nonce: 3,
			program_id: Address::default(),
			accounts: accounts(),
		};
		request.prepare().unwrap()
	}

	#[test]
	fn test_decodes_deposit() {
		let payload = DepositRequest::new(DESTINATION, 42, Address::default(), accounts())
			.build_instruction()
			.unwrap();
		let decoded = BridgeInstruction::unpack(payload.data(), 64).unwrap();

		assert_eq!(
			decoded,
			BridgeInstruction::Deposit {
				amount: 42,
				destination: DESTINATION.to_string()
			}
		);
		assert_eq!(decoded.tag(), InstructionTag::Deposit);
	}

	#[test]
	fn test_decodes_owner_set() {
		let owners = vec![vec![7u8; 64], vec![8u8; 64], vec![9u8; 64]];
		let payload = OwnerSetRequest::new(owners.clone(), Address::default(), accounts())
			.build_instruction()
			.unwrap();

		assert_eq!(
			BridgeInstruction::unpack(payload.data(), 64).unwrap(),
			BridgeInstruction::InitOwners { owners }
		);
		// Wrong key length leaves bytes over or runs short.
		assert!(BridgeInstruction::unpack(payload.data(), 65).is_err());
		assert!(BridgeInstruction::unpack(payload.data(), 32).is_err());
		assert!(BridgeInstruction::unpack(payload.data(), 0).is_err());
	}

	#[test]
	fn test_decodes_withdraw() {
		let signatures: Vec<RecoverableSignature> = (1..=3u8)
			.map(|b| RecoverableSignature::from([b; SIGNATURE_LENGTH]))
			.collect();
		let payload = prepared(vec![5, u64::MAX], 3).assemble(&signatures).unwrap();

		assert_eq!(
			BridgeInstruction::unpack(payload.data(), 64).unwrap(),
			BridgeInstruction::Withdraw {
				amounts: vec![5, u64::MAX],
				signatures
			}
		);
	}

	#[test]
	fn test_rejects_malformed_input() {
		assert!(matches!(
			BridgeInstruction::unpack(&[], 64),
			Err(BridgeError::Decode(_))
		));
		assert!(matches!(
			BridgeInstruction::unpack(&[3], 64),
			Err(BridgeError::Decode(_))
		));
		assert!(matches!(
			BridgeInstruction::unpack(&[0, 1, 2, 3], 64),
			Err(BridgeError::Decode(_))
		));

		let payload = DepositRequest::new(DESTINATION, 1, Address::default(), accounts())
			.build_instruction()
			.unwrap();
		let mut data = payload.data().to_vec();
		data.push(0);
		assert_eq!(
			BridgeInstruction::unpack(&data, 64),
			Err(BridgeError::Decode("1 trailing bytes".into()))
		);

		// Signer count claims more signatures than present.
		let mut truncated = vec![1, 1];
		truncated.extend_from_slice(&1u64.to_le_bytes());
		truncated.push(2);
		truncated.extend_from_slice(&[0u8; SIGNATURE_LENGTH]);
		assert!(matches!(
			BridgeInstruction::unpack(&truncated, 64),
			Err(BridgeError::Decode(_))
		));
	}
}
