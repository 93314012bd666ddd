//! Positional account lists expected by the bridge program for each instruction.

use bridge_types::{AccountMeta, Address};

/// Accounts of a deposit, in program order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositAccounts {
	pub depositor_token_account: Address,
	pub vault_token_account: Address,
	pub owners: Address,
	pub depositor: Address,
	pub token_program: Address,
}

impl DepositAccounts {
	pub fn to_account_metas(&self) -> Vec<AccountMeta> {
		vec![
			AccountMeta::writable(self.depositor_token_account),
			AccountMeta::writable(self.vault_token_account),
			AccountMeta::readonly(self.owners),
			AccountMeta::signer(self.depositor),
			AccountMeta::readonly(self.token_program),
		]
	}
}

/// Accounts of the owner-set initialization, in program order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOwnersAccounts {
	pub owners: Address,
	pub nonce: Address,
	/// Pays for both program-derived accounts.
	pub authority: Address,
	pub system_program: Address,
}

impl InitOwnersAccounts {
	pub fn to_account_metas(&self) -> Vec<AccountMeta> {
		vec![
			AccountMeta::writable(self.owners),
			AccountMeta::writable(self.nonce),
			AccountMeta::writable_signer(self.authority),
			AccountMeta::readonly(self.system_program),
		]
	}
}

/// Accounts of a withdrawal, in program order.
///
/// `recipients` must be the withdrawal destinations in the same order as the
/// amounts; the program reads them back to rebuild the signed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawAccounts {
	pub vault_token_account: Address,
	pub vault_authority: Address,
	pub nonce: Address,
	pub owners: Address,
	pub token_program: Address,
	pub fee_payer: Address,
	pub recipients: Vec<Address>,
	/// Accounts that receive rent back when a recipient's temporary account is closed.
	pub close_destinations: Vec<Address>,
}

impl WithdrawAccounts {
	pub fn to_account_metas(&self) -> Vec<AccountMeta> {
		let mut metas =
			Vec::with_capacity(6 + self.recipients.len() + self.close_destinations.len());
		metas.extend([
			AccountMeta::writable(self.vault_token_account),
			AccountMeta::readonly(self.vault_authority),
			AccountMeta::writable(self.nonce),
			AccountMeta::readonly(self.owners),
			AccountMeta::readonly(self.token_program),
			AccountMeta::writable_signer(self.fee_payer),
		]);
		metas.extend(self.recipients.iter().copied().map(AccountMeta::writable));
		metas.extend(
			self.close_destinations
				.iter()
				.copied()
				.map(AccountMeta::writable),
		);
		metas
	}
}
