use crate::client::L1ProofClient;
use crate::error::ProofSubmitterError;
use crate::types::BlockMetadata;
use alloy::primitives::B256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalStatus {
    Canonical,
    /// The L1 block at the recorded height now has hash `actual`.
    Reorged { actual: B256 },
}

/// Checks that the L1 block a proposal was anchored to is still part of the canonical chain.
///
/// A failed header read is returned as an error and should be retried; a hash mismatch is
/// not an error, the proof target simply no longer exists.
pub async fn check_canonical(
    client: &dyn L1ProofClient,
    block_id: u64,
    meta: &BlockMetadata,
) -> Result<CanonicalStatus, ProofSubmitterError> {
    let l1_hash = match client.l1_block_hash(meta.l1_height).await {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(
                block_id,
                l1_height = meta.l1_height,
                l1_hash = %meta.l1_hash,
                error = %e,
                "Failed to fetch L1 block"
            );
            return Err(e);
        }
    };

    if l1_hash != meta.l1_hash {
        tracing::warn!(
            block_id,
            l1_height = meta.l1_height,
            l1_hash_old = %meta.l1_hash,
            l1_hash_new = %l1_hash,
            "Reorg detected, skip the current proof submission"
        );
        return Ok(CanonicalStatus::Reorged { actual: l1_hash });
    }

    Ok(CanonicalStatus::Canonical)
}
