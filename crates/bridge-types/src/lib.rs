//! Common types module for the bridge instruction toolkit.
//!
//! This module defines the value types shared by the encoders, the configuration
//! layer, and the ledger collaborator boundary. Everything here is request-scoped
//! and immutable once built.

/// Ledger addresses in their raw and base58 forms.
pub mod address;
/// Instruction payloads and their positional account references.
pub mod instruction;
/// Zeroizing container for custodian key material.
pub mod secret;
/// Fixed-size recoverable ECDSA signatures.
pub mod signature;
/// Utility functions for hex and display formatting.
pub mod utils;

pub use address::{Address, AddressParseError};
pub use instruction::{AccountMeta, InstructionPayload};
pub use secret::CustodianKey;
pub use signature::{RecoverableSignature, SIGNATURE_LENGTH};
pub use utils::{truncate_id, with_0x_prefix, without_0x_prefix};
