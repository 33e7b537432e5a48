use crate::error::ProofSubmitterError;
use crate::types::ProtocolStateVariables;
use alloy::primitives::{Address, TxHash, B256};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Chain reads a proof submission campaign depends on.
///
/// Implementations are shared read-only between concurrent campaigns, so every method
/// takes `&self`. Errors from the read methods are treated as transient by the
/// coordinator and trigger a retry on the next tick.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait L1ProofClient: Send + Sync {
    /// Hash of the L1 block at `l1_height` on the current canonical chain.
    async fn l1_block_hash(&self, l1_height: u64) -> Result<B256, ProofSubmitterError>;

    /// Whether a proof for `block_id` is still needed.
    ///
    /// `prover` filters the existing proof by submitter; [`Address::ZERO`] matches any
    /// prover.
    async fn need_new_proof(&self, block_id: u64, prover: Address) -> Result<bool, ProofSubmitterError>;

    /// Current protocol state variables.
    async fn protocol_state_variables(&self) -> Result<ProtocolStateVariables, ProofSubmitterError>;

    /// Wait until `tx_hash` is mined. Fails if the transaction reverted or could not be
    /// observed in time.
    async fn wait_receipt(&self, tx_hash: TxHash) -> Result<(), ProofSubmitterError>;
}
