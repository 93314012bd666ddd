//! Withdraw instruction: release vault tokens to a list of recipients, authorized
//! by one signature per custodian.
//!
//! Wire format:
//! `0x01 ‖ amount_count (u8) ‖ amount_i (u64 LE)... ‖ signer_count (u8) ‖ signature_i (65 bytes)...`
//!
//! The recipients themselves travel in the account list; the program rebuilds the
//! canonical sign message from those accounts, the amounts and its stored nonce.

use crate::signer::{DigestSigner, LocalSigner, SignerError};
use crate::{BridgeError, InstructionTag, SignData, MAX_WIRE_COUNT};
use alloy_primitives::B256;
use bridge_types::{
	AccountMeta, Address, CustodianKey, InstructionPayload, RecoverableSignature,
	SIGNATURE_LENGTH,
};
use tracing::instrument;

/// Semantic parameters of a withdrawal.
#[derive(Debug, Clone)]
pub struct WithdrawRequest {
	/// Custodian secret keys, in the order the signatures must appear.
	pub custodian_keys: Vec<CustodianKey>,
	pub amounts: Vec<u64>,
	/// Recipient identifiers; `destinations[i]` receives `amounts[i]`.
	pub destinations: Vec<Address>,
	/// Current value of the program's replay counter.
	pub nonce: u64,
	pub program_id: Address,
	pub accounts: Vec<AccountMeta>,
}

impl WithdrawRequest {
	/// The message every custodian signs for this request.
	pub fn sign_data(&self) -> SignData<'_> {
		SignData::new(&self.amounts, &self.destinations, self.nonce)
	}

	/// Validates the request and builds everything that precedes the signatures.
	///
	/// No key material is touched here, so a failing request never reaches a signer.
	#[instrument(skip_all, fields(recipients = self.amounts.len(), signers = self.custodian_keys.len(), nonce = self.nonce))]
	pub fn prepare(&self) -> Result<PreparedWithdraw, BridgeError> {
		if self.amounts.len() != self.destinations.len() {
			return Err(BridgeError::LengthMismatch {
				amounts: self.amounts.len(),
				addresses: self.destinations.len(),
			});
		}
		if self.amounts.is_empty() {
			return Err(BridgeError::EmptyWithdrawList);
		}
		if self.amounts.len() > MAX_WIRE_COUNT {
			return Err(BridgeError::TooManyRecipients {
				count: self.amounts.len(),
				max: MAX_WIRE_COUNT,
			});
		}
		if self.custodian_keys.is_empty() {
			return Err(BridgeError::NoCustodianKeys);
		}
		if self.custodian_keys.len() > MAX_WIRE_COUNT {
			return Err(BridgeError::TooManySigners {
				count: self.custodian_keys.len(),
				max: MAX_WIRE_COUNT,
			});
		}
		if self.accounts.is_empty() {
			return Err(BridgeError::AccountSliceConstructionFailure(
				"withdraw requires at least one account".into(),
			));
		}

		let signer_count = self.custodian_keys.len();
		let mut data = Vec::with_capacity(
			1 + 1 + 8 * self.amounts.len() + 1 + SIGNATURE_LENGTH * signer_count,
		);
		data.push(InstructionTag::Withdraw.as_byte());
		data.push(self.amounts.len() as u8);
		for amount in &self.amounts {
			data.extend_from_slice(&amount.to_le_bytes());
		}

		let sign_hash = self.sign_data().digest()?;
		tracing::debug!(sign_hash = %sign_hash, "Prepared withdraw");

		Ok(PreparedWithdraw {
			program_id: self.program_id,
			accounts: self.accounts.clone(),
			data,
			sign_hash,
			signer_count,
		})
	}

	/// Builds the withdraw instruction, signing sequentially with [`LocalSigner`].
	pub fn build_instruction(&self) -> Result<InstructionPayload, BridgeError> {
		self.build_instruction_with(&LocalSigner)
	}

	/// Builds the withdraw instruction with the given signer.
	pub fn build_instruction_with(
		&self,
		signer: &dyn DigestSigner,
	) -> Result<InstructionPayload, BridgeError> {
		self.prepare()?.sign_with(signer, &self.custodian_keys)
	}
}

/// A validated withdrawal waiting for its signatures.
///
/// Holds no key material. Signing can be scheduled independently of this value,
/// as long as the signatures are handed back in custodian-key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedWithdraw {
	program_id: Address,
	accounts: Vec<AccountMeta>,
	data: Vec<u8>,
	sign_hash: B256,
	signer_count: usize,
}

impl PreparedWithdraw {
	/// Keccak-256 of the canonical sign message.
	pub fn sign_hash(&self) -> &B256 {
		&self.sign_hash
	}

	/// Number of signatures [`assemble`](Self::assemble) expects.
	pub fn signer_count(&self) -> usize {
		self.signer_count
	}

	/// Signs with every key in order and assembles the payload.
	pub fn sign_with(
		self,
		signer: &dyn DigestSigner,
		keys: &[CustodianKey],
	) -> Result<InstructionPayload, BridgeError> {
		let signatures = keys
			.iter()
			.enumerate()
			.map(|(index, key)| sign_custodian(signer, index, key, &self.sign_hash))
			.collect::<Result<Vec<_>, _>>()?;
		self.assemble(&signatures)
	}

	/// Appends `signer_count ‖ signatures` and builds the final payload.
	pub fn assemble(
		self,
		signatures: &[RecoverableSignature],
	) -> Result<InstructionPayload, BridgeError> {
		if signatures.len() != self.signer_count {
			return Err(BridgeError::SignatureCountMismatch {
				expected: self.signer_count,
				actual: signatures.len(),
			});
		}

		let mut data = self.data;
		data.push(signatures.len() as u8);
		for signature in signatures {
			data.extend_from_slice(signature.as_bytes());
		}

		InstructionPayload::new(self.program_id, self.accounts, data).ok_or_else(|| {
			BridgeError::AccountSliceConstructionFailure("empty withdraw payload".into())
		})
	}
}

/// Signs `digest` with the custodian key at position `index`.
pub fn sign_custodian(
	signer: &dyn DigestSigner,
	index: usize,
	key: &CustodianKey,
	digest: &B256,
) -> Result<RecoverableSignature, BridgeError> {
	signer
		.sign_digest(key, digest)
		.map_err(|e| match e {
			SignerError::InvalidKey(reason) => BridgeError::InvalidSigningKey { index, reason },
			SignerError::Signing(reason) => BridgeError::SigningFailure { index, reason },
		})
}

/// Smallest number of signatures the program accepts for `owner_count` custodians.
pub fn quorum_threshold(owner_count: usize) -> usize {
	owner_count * 2 / 3 + 1
}
