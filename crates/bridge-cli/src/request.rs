//! JSON requests accepted by the `bridge` subcommands.

use bridge_core::{InstructionBuilder, ServiceError};
use bridge_types::{without_0x_prefix, Address, InstructionPayload};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while turning a request into an instruction.
#[derive(Debug, Error)]
pub enum RequestError {
	#[error("Invalid request: {0}")]
	Invalid(String),
	#[error(transparent)]
	Service(#[from] ServiceError),
}

impl From<serde_json::Error> for RequestError {
	fn from(err: serde_json::Error) -> Self {
		RequestError::Invalid(err.to_string())
	}
}

/// `bridge deposit` request.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepositCommand {
	/// Destination-chain address, `0x`-prefixed hex.
	pub destination: String,
	pub amount: u64,
	pub depositor: Address,
	pub depositor_token_account: Address,
}

impl DepositCommand {
	pub fn build(&self, builder: &InstructionBuilder) -> Result<InstructionPayload, RequestError> {
		Ok(builder.build_deposit(
			&self.destination,
			self.amount,
			self.depositor,
			self.depositor_token_account,
		)?)
	}
}

/// `bridge init-owners` request.
///
/// Either lists the owner keys as hex, or asks for the public keys of the
/// configured custodians.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitOwnersCommand {
	#[serde(default)]
	pub owners: Vec<String>,
	#[serde(default)]
	pub from_custodians: bool,
}

impl InitOwnersCommand {
	pub fn build(&self, builder: &InstructionBuilder) -> Result<InstructionPayload, RequestError> {
		let owners = match (self.from_custodians, self.owners.is_empty()) {
			(true, true) => builder.custodian_owner_keys()?,
			(false, false) => self
				.owners
				.iter()
				.enumerate()
				.map(|(index, owner)| {
					hex::decode(without_0x_prefix(owner)).map_err(|e| {
						RequestError::Invalid(format!("owner {} is not valid hex: {}", index, e))
					})
				})
				.collect::<Result<Vec<_>, _>>()?,
			(true, false) => {
				return Err(RequestError::Invalid(
					"owners and from_custodians are mutually exclusive".into(),
				))
			},
			(false, true) => {
				return Err(RequestError::Invalid(
					"either owners or from_custodians is required".into(),
				))
			},
		};
		Ok(builder.build_initialize_owners(owners)?)
	}
}

/// `bridge withdraw` request.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WithdrawCommand {
	pub amounts: Vec<u64>,
	pub recipients: Vec<Address>,
	#[serde(default)]
	pub close_destinations: Vec<Address>,
	/// Current nonce of the program, read by the operator beforehand.
	pub nonce: u64,
}

impl WithdrawCommand {
	pub async fn build(
		self,
		builder: &InstructionBuilder,
	) -> Result<InstructionPayload, RequestError> {
		Ok(builder
			.build_withdraw(
				self.amounts,
				self.recipients,
				self.close_destinations,
				self.nonce,
			)
			.await?)
	}
}
