//! Deployment configuration for the bridge toolkit.
//!
//! All deployment constants (program id, vault accounts, custodian keys) come from
//! a TOML file. `${VAR}` and `${VAR:-default}` references are resolved from the
//! environment before parsing, so key material never has to live in the file.

use bridge_types::{Address, CustodianKey};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Largest custodian set the single-byte wire counts can express.
const MAX_CUSTODIANS: usize = 255;

/// SPL token program.
const DEFAULT_TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level bridge configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// The deployed bridge program.
	pub program: ProgramConfig,
	/// Accounts referenced by the bridge instructions.
	pub accounts: AccountsConfig,
	/// Custodian key set used to authorize withdrawals.
	pub custodians: CustodiansConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProgramConfig {
	/// Program id of the bridge program.
	pub id: Address,
}

/// Addresses of the program state and vault accounts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountsConfig {
	/// Owner-set state account.
	pub owners: Address,
	/// Replay-counter state account.
	pub nonce: Address,
	/// Token account holding the locked funds.
	pub vault_token_account: Address,
	/// Program-derived authority over the vault token account.
	pub vault_authority: Address,
	/// Pays fees and acts as the initialization authority.
	pub fee_payer: Address,
	#[serde(default = "default_token_program")]
	pub token_program: Address,
	#[serde(default)]
	pub system_program: Address,
}

fn default_token_program() -> Address {
	DEFAULT_TOKEN_PROGRAM.parse().unwrap_or_default()
}

/// Custodian keys and signing limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustodiansConfig {
	/// Hex-encoded secp256k1 secret keys, in owner-set order.
	pub signing_keys: Vec<CustodianKey>,
	/// Size of the registered owner set. When set, withdrawals signed by fewer
	/// keys than the on-chain quorum are reported.
	#[serde(default)]
	pub owner_count: Option<usize>,
	/// Upper bound on concurrently running signing tasks.
	/// Defaults to 4 if not specified.
	#[serde(default = "default_max_parallel_signers")]
	pub max_parallel_signers: usize,
}

fn default_max_parallel_signers() -> usize {
	4
}

/// Resolves `${VAR}` and `${VAR:-default}` references against the environment.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last = 0;
	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match cap.get(2) {
				Some(default) => default.as_str().to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)))
				},
			},
		};

		result.push_str(&input[last..full_match.start()]);
		result.push_str(&value);
		last = full_match.end();
	}
	result.push_str(&input[last..]);

	Ok(result)
}

impl Config {
	/// Loads, resolves and validates a configuration file.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	fn validate(&self) -> Result<(), ConfigError> {
		let custodians = &self.custodians;
		if custodians.signing_keys.is_empty() {
			return Err(ConfigError::Validation(
				"At least one custodian signing key must be configured".into(),
			));
		}
		if custodians.signing_keys.len() > MAX_CUSTODIANS {
			return Err(ConfigError::Validation(format!(
				"Too many custodian signing keys: {} (max: {})",
				custodians.signing_keys.len(),
				MAX_CUSTODIANS
			)));
		}
		if let Some(index) = custodians.signing_keys.iter().position(CustodianKey::is_empty) {
			return Err(ConfigError::Validation(format!(
				"Custodian signing key {} is empty",
				index
			)));
		}
		if custodians.max_parallel_signers == 0 {
			return Err(ConfigError::Validation(
				"max_parallel_signers must be at least 1".into(),
			));
		}
		if let Some(count) = custodians.owner_count {
			if !(1..=MAX_CUSTODIANS).contains(&count) {
				return Err(ConfigError::Validation(format!(
					"owner_count must be between 1 and {}, got {}",
					MAX_CUSTODIANS, count
				)));
			}
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
