//! Ledger collaborator boundary for the bridge toolkit.
//!
//! Transaction assembly, submission and account queries live outside this
//! workspace. This crate defines the interface they are reached through, the
//! submission error category, and the layout of the program state the toolkit
//! reads back (the replay counter).

use async_trait::async_trait;
use bridge_types::{Address, InstructionPayload};
use serde::Serialize;
use thiserror::Error;

/// Seed of the owner-set state account.
pub const OWNERS_SEED: &[u8] = &[0];
/// Seed of the replay-counter state account.
pub const NONCE_SEED: &[u8] = &[1];

/// Errors raised by the ledger collaborator.
///
/// Kept apart from the encoder errors: these are environmental and may succeed
/// on retry, encoder errors never do.
#[derive(Debug, Error)]
pub enum SubmissionError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when a transaction execution fails.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
	/// The queried account does not exist.
	#[error("Account not found: {0}")]
	AccountNotFound(Address),
	/// The account exists but its data does not have the expected layout.
	#[error("Invalid account data: {0}")]
	InvalidAccountData(String),
}

/// Outcome of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
	/// Transaction signature as reported by the ledger.
	pub signature: String,
	/// Slot the transaction was processed in.
	pub slot: u64,
}

/// Trait defining the interface to the host ledger.
///
/// Implementations own RPC access, blockhash handling and fee-payer signing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LedgerInterface: Send + Sync {
	/// Returns the raw data of an account.
	async fn account_data(&self, address: &Address) -> Result<Vec<u8>, SubmissionError>;

	/// Derives the program address for a single seed.
	async fn derive_program_address(
		&self,
		seed: &[u8],
		program_id: &Address,
	) -> Result<Address, SubmissionError>;

	/// Wraps the instructions in a transaction signed by `signers` and submits it.
	async fn submit(
		&self,
		instructions: &[InstructionPayload],
		signers: &[Address],
	) -> Result<TransactionResult, SubmissionError>;
}

/// Replay-counter state: `is_initialized (u8) ‖ nonce (u64 LE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceAccount {
	pub is_initialized: bool,
	pub nonce: u64,
}

impl NonceAccount {
	pub const LEN: usize = 9;

	pub fn unpack(data: &[u8]) -> Result<Self, SubmissionError> {
		if data.len() < Self::LEN {
			return Err(SubmissionError::InvalidAccountData(format!(
				"nonce account holds {} bytes, expected {}",
				data.len(),
				Self::LEN
			)));
		}
		let is_initialized = match data[0] {
			0 => false,
			1 => true,
			other => {
				return Err(SubmissionError::InvalidAccountData(format!(
					"invalid initialization flag {}",
					other
				)))
			},
		};
		let mut nonce = [0u8; 8];
		nonce.copy_from_slice(&data[1..Self::LEN]);
		Ok(Self {
			is_initialized,
			nonce: u64::from_le_bytes(nonce),
		})
	}
}

/// Reads the current replay counter from the nonce state account.
pub async fn current_nonce(
	ledger: &dyn LedgerInterface,
	nonce_account: &Address,
) -> Result<u64, SubmissionError> {
	let data = ledger.account_data(nonce_account).await?;
	let state = NonceAccount::unpack(&data)?;
	if !state.is_initialized {
		return Err(SubmissionError::InvalidAccountData(
			"nonce account is not initialized".into(),
		));
	}
	tracing::debug!(nonce = state.nonce, "Read bridge nonce");
	Ok(state.nonce)
}

/// Program-derived addresses of a bridge deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAccounts {
	pub owners: Address,
	pub nonce: Address,
	pub vault_authority: Address,
}

/// Derives the state and vault-authority addresses of the program.
pub async fn derive_bridge_accounts(
	ledger: &dyn LedgerInterface,
	program_id: &Address,
) -> Result<DerivedAccounts, SubmissionError> {
	let owners = ledger.derive_program_address(OWNERS_SEED, program_id).await?;
	let nonce = ledger.derive_program_address(NONCE_SEED, program_id).await?;
	let vault_authority = ledger
		.derive_program_address(owners.as_bytes(), program_id)
		.await?;
	Ok(DerivedAccounts {
		owners,
		nonce,
		vault_authority,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use mockall::predicate::eq;

	fn nonce_data(flag: u8, nonce: u64) -> Vec<u8> {
		let mut data = vec![flag];
		data.extend_from_slice(&nonce.to_le_bytes());
		data
	}

	#[test]
	fn test_unpack_nonce_account() {
		assert_eq!(
			NonceAccount::unpack(&nonce_data(1, 42)).unwrap(),
			NonceAccount {
				is_initialized: true,
				nonce: 42
			}
		);
		// Trailing bytes beyond the layout are ignored.
		let mut padded = nonce_data(0, 7);
		padded.extend_from_slice(&[0xff; 4]);
		assert_eq!(
			NonceAccount::unpack(&padded).unwrap(),
			NonceAccount {
				is_initialized: false,
				nonce: 7
			}
		);
	}

	#[test]
	fn test_unpack_rejects_bad_data() {
		assert!(matches!(
			NonceAccount::unpack(&[1, 0, 0]),
			Err(SubmissionError::InvalidAccountData(_))
		));
		assert!(matches!(
			NonceAccount::unpack(&nonce_data(2, 0)),
			Err(SubmissionError::InvalidAccountData(_))
		));
	}

	#[tokio::test]
	async fn test_current_nonce() {
		let account = Address::new([7u8; 32]);
		let mut ledger = MockLedgerInterface::new();
		ledger
			.expect_account_data()
			.with(eq(account))
			.times(1)
			.returning(|_| Ok(nonce_data(1, u64::MAX)));

		assert_eq!(current_nonce(&ledger, &account).await.unwrap(), u64::MAX);
	}

	#[tokio::test]
	async fn test_current_nonce_requires_initialized_account() {
		let mut ledger = MockLedgerInterface::new();
		ledger
			.expect_account_data()
			.returning(|_| Ok(nonce_data(0, 3)));

		let result = current_nonce(&ledger, &Address::default()).await;
		assert!(matches!(result, Err(SubmissionError::InvalidAccountData(_))));
	}

	#[tokio::test]
	async fn test_current_nonce_propagates_missing_account() {
		let mut ledger = MockLedgerInterface::new();
		ledger
			.expect_account_data()
			.returning(|address| Err(SubmissionError::AccountNotFound(*address)));

		let result = current_nonce(&ledger, &Address::new([1u8; 32])).await;
		assert!(matches!(result, Err(SubmissionError::AccountNotFound(_))));
	}

	#[tokio::test]
	async fn test_derive_bridge_accounts() {
		let program_id = Address::new([9u8; 32]);
		let owners = Address::new([10u8; 32]);
		let mut ledger = MockLedgerInterface::new();
		ledger
			.expect_derive_program_address()
			.returning(move |seed, _| {
				Ok(match seed {
					[0] => Address::new([10u8; 32]),
					[1] => Address::new([11u8; 32]),
					other if other == owners.as_bytes() => Address::new([12u8; 32]),
					_ => Address::default(),
				})
			})
			.times(3);

		let derived = derive_bridge_accounts(&ledger, &program_id).await.unwrap();
		assert_eq!(
			derived,
			DerivedAccounts {
				owners,
				nonce: Address::new([11u8; 32]),
				vault_authority: Address::new([12u8; 32]),
			}
		);
	}
}
