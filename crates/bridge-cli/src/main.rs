//! Main entry point for the `bridge` command.
//!
//! Builds bridge program instructions offline from a deployment configuration and
//! a JSON request, and prints the resulting instruction payload as JSON. Submission
//! is left to whatever wallet or relayer consumes the output.

use bridge_config::Config;
use bridge_core::InstructionBuilder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod request;

use request::{DepositCommand, InitOwnersCommand, WithdrawCommand};

/// Command-line arguments for the bridge encoder.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Lock tokens in the vault for a destination-chain address
	Deposit {
		/// Deposit request as JSON
		#[arg(short, long)]
		request: String,
	},
	/// Register the custodian public keys
	InitOwners {
		/// Owner-set request as JSON
		#[arg(short, long)]
		request: String,
	},
	/// Release vault tokens, signed by every configured custodian
	Withdraw {
		/// Withdraw request as JSON
		#[arg(short, long)]
		request: String,
	},
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	// Logs go to stderr so stdout carries only the payload.
	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.with_writer(std::io::stderr)
		.init();

	let config_path = args
		.config
		.to_str()
		.ok_or_else(|| format!("Invalid config path: {}", args.config.display()))?;
	let config = Config::from_file(config_path).await?;
	tracing::info!(program = %config.program.id, "Loaded configuration");

	let builder = InstructionBuilder::new(config);
	let payload = match args.command {
		Command::Deposit { request } => {
			serde_json::from_str::<DepositCommand>(&request)?.build(&builder)?
		},
		Command::InitOwners { request } => {
			serde_json::from_str::<InitOwnersCommand>(&request)?.build(&builder)?
		},
		Command::Withdraw { request } => {
			serde_json::from_str::<WithdrawCommand>(&request)?
				.build(&builder)
				.await?
		},
	};

	tracing::info!(data_len = payload.data().len(), "Built instruction");
	println!("{}", serde_json::to_string_pretty(&payload)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_withdraw_args() {
		let args = Args::try_parse_from([
			"bridge",
			"--config",
			"bridge.toml",
			"--log-level",
			"debug",
			"withdraw",
			"--request",
			r#"{"amounts":[1],"recipients":[],"nonce":0}"#,
		])
		.unwrap();

		assert_eq!(args.config, PathBuf::from("bridge.toml"));
		assert_eq!(args.log_level, "debug");
		assert!(matches!(args.command, Command::Withdraw { .. }));
	}

	#[test]
	fn test_defaults_and_kebab_case_subcommand() {
		let args =
			Args::try_parse_from(["bridge", "init-owners", "-r", r#"{"from_custodians":true}"#])
				.unwrap();

		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
		let Command::InitOwners { request } = args.command else {
			panic!("expected init-owners");
		};
		assert!(request.contains("from_custodians"));
	}

	#[test]
	fn test_subcommand_is_required() {
		assert!(Args::try_parse_from(["bridge", "--config", "bridge.toml"]).is_err());
	}

	#[tokio::test]
	async fn test_config_file_drives_builder() {
		let temp_dir = tempfile::TempDir::new().unwrap();
		let path = temp_dir.path().join("bridge.toml");
		std::fs::write(
			&path,
			r#"
[program]
id = "4uQeVj5tqViQh7yWWGStvkEG1Zmhx6uasJtWCJziofM"

[accounts]
owners = "8qbHbw2BbbTHBW1sbeqakYXVKRQM8Ne7pLK7m6CVfeR"
nonce = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"
vault_token_account = "2ZnVWA3RqvzSTbKGZJQwPmbQXxNLDdgaPk2fpKqxQzKj"
vault_authority = "GjwcWFQYzemBtpUoN5fMAP2FZviTtMRWCmrppGuTthJS"
fee_payer = "5ZiE3vAkrdXBgyFL7KqG3RoEGBws4CjRcXVbABDLZTgx"

[custodians]
signing_keys = ["aad53b70ad9ed01b75238533dd6b395f4d300427da0165aafbd42ea7a606601f"]
"#,
		)
		.unwrap();

		let config = Config::from_file(path.to_str().unwrap()).await.unwrap();
		let builder = InstructionBuilder::new(config);
		let payload = serde_json::from_str::<InitOwnersCommand>(r#"{"from_custodians":true}"#)
			.unwrap()
			.build(&builder)
			.unwrap();

		let json = serde_json::to_value(&payload).unwrap();
		assert_eq!(
			json["program_id"],
			"4uQeVj5tqViQh7yWWGStvkEG1Zmhx6uasJtWCJziofM"
		);
		assert!(json["data"].as_str().unwrap().starts_with("0x0201"));
	}
}
