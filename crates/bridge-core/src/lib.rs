//! Bridge service: runs the bridge instructions against a ledger.
//!
//! The service owns the deployment configuration, builds the positional account
//! lists from it, encodes each instruction, signs withdrawals with a bounded pool
//! of signers and hands the result to the ledger collaborator for submission.

use bridge_config::Config;
use bridge_delivery::{current_nonce, LedgerInterface, SubmissionError, TransactionResult};
use bridge_instructions::{BridgeError, DigestSigner};
use bridge_types::{truncate_id, Address};
use std::sync::Arc;
use thiserror::Error;
use tracing::instrument;

pub mod builder;
pub mod signing;

pub use builder::InstructionBuilder;
pub use signing::sign_in_parallel;

/// Errors that can occur during bridge service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
	/// The instruction could not be built.
	#[error("Instruction error: {0}")]
	Instruction(#[from] BridgeError),
	/// The ledger rejected or failed the request.
	#[error("Submission error: {0}")]
	Submission(#[from] SubmissionError),
	/// The signing pool itself failed.
	#[error("Signing error: {0}")]
	Signing(String),
}

/// Service that encodes, signs and submits bridge instructions.
pub struct BridgeService {
	builder: InstructionBuilder,
	ledger: Arc<dyn LedgerInterface>,
}

impl BridgeService {
	/// Creates a service signing in-process with the configured custodian keys.
	pub fn new(config: Config, ledger: Arc<dyn LedgerInterface>) -> Self {
		Self {
			builder: InstructionBuilder::new(config),
			ledger,
		}
	}

	/// Replaces the custodian signer.
	pub fn with_signer(mut self, signer: Arc<dyn DigestSigner>) -> Self {
		self.builder = self.builder.with_signer(signer);
		self
	}

	pub fn builder(&self) -> &InstructionBuilder {
		&self.builder
	}

	/// Deposits into the vault. The depositor signs the transaction.
	#[instrument(skip_all, fields(amount = amount, depositor = %truncate_id(&depositor.to_string())))]
	pub async fn deposit(
		&self,
		destination: &str,
		amount: u64,
		depositor: Address,
		depositor_token_account: Address,
	) -> Result<TransactionResult, ServiceError> {
		let payload =
			self.builder
				.build_deposit(destination, amount, depositor, depositor_token_account)?;
		let result = self.ledger.submit(&[payload], &[depositor]).await?;
		tracing::info!(signature = %result.signature, "Deposit submitted");
		Ok(result)
	}

	/// Registers the custodian set. The fee payer signs as authority.
	#[instrument(skip_all, fields(owners = owners.len()))]
	pub async fn initialize_owners(
		&self,
		owners: Vec<Vec<u8>>,
	) -> Result<TransactionResult, ServiceError> {
		let payload = self.builder.build_initialize_owners(owners)?;
		let fee_payer = self.builder.config().accounts.fee_payer;
		let result = self.ledger.submit(&[payload], &[fee_payer]).await?;
		tracing::info!(signature = %result.signature, "Owner set submitted");
		Ok(result)
	}

	/// Withdraws from the vault at the program's current nonce.
	#[instrument(skip_all, fields(recipients = recipients.len()))]
	pub async fn withdraw(
		&self,
		amounts: Vec<u64>,
		recipients: Vec<Address>,
		close_destinations: Vec<Address>,
	) -> Result<TransactionResult, ServiceError> {
		let accounts = &self.builder.config().accounts;
		let nonce = current_nonce(self.ledger.as_ref(), &accounts.nonce).await?;
		let payload = self
			.builder
			.build_withdraw(amounts, recipients, close_destinations, nonce)
			.await?;
		let result = self.ledger.submit(&[payload], &[accounts.fee_payer]).await?;
		tracing::info!(signature = %result.signature, nonce, "Withdraw submitted");
		Ok(result)
	}
}
