//! Instruction encoding and multi-signature authorization for the token bridge program.
//!
//! This crate turns semantic requests (deposit an amount to a destination-chain
//! address, register the custodian set, withdraw to a list of recipients) into the
//! exact instruction bytes the on-chain program parses. Withdrawals additionally
//! carry one recoverable secp256k1 signature per custodian over the Keccak-256 hash
//! of a canonical JSON message that the program rebuilds and hashes on its side.
//!
//! All operations are pure functions of their inputs: no I/O, no shared state.
//! Every failure is a typed [`BridgeError`] and no partially built payload is ever
//! returned.

pub mod accounts;
pub mod decode;
pub mod deposit;
pub mod error;
pub mod owners;
pub mod sign_data;
pub mod signer;
pub mod tag;
pub mod withdraw;

pub use accounts::{DepositAccounts, InitOwnersAccounts, WithdrawAccounts};
pub use decode::BridgeInstruction;
pub use deposit::{DepositRequest, DESTINATION_ADDRESS_LENGTH};
pub use error::BridgeError;
pub use owners::OwnerSetRequest;
pub use sign_data::SignData;
pub use signer::{custodian_public_key, DigestSigner, LocalSigner, SignerError};
pub use tag::InstructionTag;
pub use withdraw::{quorum_threshold, sign_custodian, PreparedWithdraw, WithdrawRequest};

/// Largest count that fits the single-byte length prefixes of the wire format.
pub const MAX_WIRE_COUNT: usize = u8::MAX as usize;
