//! Bounded parallel signing of a withdraw digest.

use crate::ServiceError;
use alloy_primitives::B256;
use bridge_instructions::{sign_custodian, DigestSigner};
use bridge_types::{CustodianKey, RecoverableSignature};
use futures::future::try_join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Signs `digest` with every key, running at most `max_parallel` signers at once.
///
/// Signatures are returned in key order whatever order the signers finish in.
/// The first failure aborts the whole set.
pub async fn sign_in_parallel(
	signer: Arc<dyn DigestSigner>,
	keys: &[CustodianKey],
	digest: B256,
	max_parallel: usize,
) -> Result<Vec<RecoverableSignature>, ServiceError> {
	let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));

	let tasks = keys.iter().cloned().enumerate().map(|(index, key)| {
		let semaphore = semaphore.clone();
		let signer = signer.clone();
		async move {
			let _permit = semaphore
				.acquire_owned()
				.await
				.map_err(|e| ServiceError::Signing(e.to_string()))?;
			tokio::task::spawn_blocking(move || {
				sign_custodian(signer.as_ref(), index, &key, &digest)
			})
			.await
			.map_err(|e| ServiceError::Signing(format!("signer task {} failed: {}", index, e)))?
			.map_err(ServiceError::from)
		}
	});

	try_join_all(tasks).await
}
