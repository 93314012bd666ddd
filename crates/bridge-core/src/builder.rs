//! Offline construction of bridge instructions from the deployment configuration.

use crate::{sign_in_parallel, ServiceError};
use bridge_config::Config;
use bridge_instructions::{
	custodian_public_key, quorum_threshold, BridgeError, DepositAccounts, DepositRequest,
	DigestSigner, InitOwnersAccounts, LocalSigner, OwnerSetRequest, WithdrawAccounts,
	WithdrawRequest,
};
use bridge_types::{Address, InstructionPayload};
use std::sync::Arc;

/// Builds ready-to-submit instructions: account lists come from the configuration,
/// withdraw signatures from the configured custodian keys.
#[derive(Clone)]
pub struct InstructionBuilder {
	config: Config,
	signer: Arc<dyn DigestSigner>,
}

impl InstructionBuilder {
	/// Creates a builder signing in-process with the configured custodian keys.
	pub fn new(config: Config) -> Self {
		Self {
			config,
			signer: Arc::new(LocalSigner),
		}
	}

	/// Replaces the custodian signer.
	pub fn with_signer(mut self, signer: Arc<dyn DigestSigner>) -> Self {
		self.signer = signer;
		self
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Builds a deposit of `amount` from `depositor_token_account` to `destination`.
	pub fn build_deposit(
		&self,
		destination: &str,
		amount: u64,
		depositor: Address,
		depositor_token_account: Address,
	) -> Result<InstructionPayload, ServiceError> {
		let accounts = DepositAccounts {
			depositor_token_account,
			vault_token_account: self.config.accounts.vault_token_account,
			owners: self.config.accounts.owners,
			depositor,
			token_program: self.config.accounts.token_program,
		};
		let request = DepositRequest::new(
			destination,
			amount,
			self.config.program.id,
			accounts.to_account_metas(),
		);
		Ok(request.build_instruction()?)
	}

	/// Public keys of the configured custodians, in configuration order.
	pub fn custodian_owner_keys(&self) -> Result<Vec<Vec<u8>>, ServiceError> {
		self.config
			.custodians
			.signing_keys
			.iter()
			.enumerate()
			.map(|(index, key)| {
				custodian_public_key(key)
					.map(|public| public.to_vec())
					.map_err(|e| {
						ServiceError::Instruction(BridgeError::InvalidSigningKey {
							index,
							reason: e.to_string(),
						})
					})
			})
			.collect()
	}

	/// Builds the one-time owner-set initialization.
	pub fn build_initialize_owners(
		&self,
		owners: Vec<Vec<u8>>,
	) -> Result<InstructionPayload, ServiceError> {
		let accounts = InitOwnersAccounts {
			owners: self.config.accounts.owners,
			nonce: self.config.accounts.nonce,
			authority: self.config.accounts.fee_payer,
			system_program: self.config.accounts.system_program,
		};
		let request =
			OwnerSetRequest::new(owners, self.config.program.id, accounts.to_account_metas());
		Ok(request.build_instruction()?)
	}

	/// Builds a withdraw for the given nonce, signed by every configured custodian.
	pub async fn build_withdraw(
		&self,
		amounts: Vec<u64>,
		recipients: Vec<Address>,
		close_destinations: Vec<Address>,
		nonce: u64,
	) -> Result<InstructionPayload, ServiceError> {
		let custodians = &self.config.custodians;
		if let Some(owner_count) = custodians.owner_count {
			let required = quorum_threshold(owner_count);
			if custodians.signing_keys.len() < required {
				tracing::warn!(
					signers = custodians.signing_keys.len(),
					required,
					"Signer count is below the program's quorum"
				);
			}
		}

		let accounts = WithdrawAccounts {
			vault_token_account: self.config.accounts.vault_token_account,
			vault_authority: self.config.accounts.vault_authority,
			nonce: self.config.accounts.nonce,
			owners: self.config.accounts.owners,
			token_program: self.config.accounts.token_program,
			fee_payer: self.config.accounts.fee_payer,
			recipients: recipients.clone(),
			close_destinations,
		};
		let request = WithdrawRequest {
			custodian_keys: custodians.signing_keys.clone(),
			amounts,
			destinations: recipients,
			nonce,
			program_id: self.config.program.id,
			accounts: accounts.to_account_metas(),
		};

		let prepared = request.prepare()?;
		let signatures = sign_in_parallel(
			self.signer.clone(),
			&request.custodian_keys,
			*prepared.sign_hash(),
			custodians.max_parallel_signers,
		)
		.await?;
		Ok(prepared.assemble(&signatures)?)
	}
}
