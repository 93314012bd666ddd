//! Tag bytes selecting the operation the bridge program executes.

use crate::BridgeError;

/// First byte of every instruction's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InstructionTag {
	/// Single-custody deposit towards the destination chain.
	Deposit = 0x00,
	/// Multi-signature withdrawal out of the vault.
	Withdraw = 0x01,
	/// One-time registration of the custodian set.
	InitOwners = 0x02,
}

impl InstructionTag {
	pub fn as_byte(self) -> u8 {
		self as u8
	}
}

impl TryFrom<u8> for InstructionTag {
	type Error = BridgeError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0x00 => Ok(Self::Deposit),
			0x01 => Ok(Self::Withdraw),
			0x02 => Ok(Self::InitOwners),
			other => Err(BridgeError::Decode(format!("unknown instruction tag {}", other))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tag_bytes_match_program_dispatch() {
		assert_eq!(InstructionTag::Deposit.as_byte(), 0);
		assert_eq!(InstructionTag::Withdraw.as_byte(), 1);
		assert_eq!(InstructionTag::InitOwners.as_byte(), 2);
	}

	#[test]
	fn test_unknown_tag_is_rejected() {
		assert!(matches!(
			InstructionTag::try_from(3),
			Err(BridgeError::Decode(_))
		));
		assert_eq!(InstructionTag::try_from(1).unwrap(), InstructionTag::Withdraw);
	}
}
