use crate::coordinator::{SubmissionCoordinator, SubmissionOutcome};
use crate::error::ProofSubmitterError;
use crate::eth::EthereumClient;
use crate::gas::build_prove_tx_options;
use crate::types::ProofSubmission;
use alloy::primitives::Bytes;
use pv_resilience::CancellationToken;
use std::sync::Arc;
use std::time::Duration;

/// Lands valid block proofs on L1 through `TaikoL1.proveBlock`.
pub struct ValidProofSubmitter {
    client: Arc<EthereumClient>,
    coordinator: SubmissionCoordinator,
    private_key: String,
    chain_id: u64,
}

impl ValidProofSubmitter {
    pub fn new(
        client: Arc<EthereumClient>,
        private_key: impl Into<String>,
        chain_id: u64,
        retry_interval: Duration,
    ) -> Self {
        let coordinator = SubmissionCoordinator::new(client.clone(), retry_interval);
        Self { client, coordinator, private_key: private_key.into(), chain_id }
    }

    /// Runs one submission campaign for `submission`.
    ///
    /// Transaction options (and with them the random priority fee) are picked once per
    /// campaign. The genesis block has no parent to prove against and is rejected up
    /// front. Returns `Ok(None)` if `cancellation` fired first.
    pub async fn submit_proof(
        &self,
        cancellation: &CancellationToken,
        submission: &ProofSubmission,
        input: Bytes,
    ) -> Result<Option<SubmissionOutcome>, ProofSubmitterError> {
        let block_id = submission.block_id;
        if block_id == 0 {
            return Err(ProofSubmitterError::InvalidProofInput("the genesis block cannot be proved".into()));
        }
        let options = build_prove_tx_options(&self.private_key, self.chain_id)?;

        tracing::info!(
            block_id,
            proposed_at = submission.proposed_at,
            expected_reward = submission.expected_reward,
            prover = %options.sender(),
            input_len = input.len(),
            "📤 Submitting block proof"
        );

        let outcome = self
            .coordinator
            .send_tx_with_backoff(cancellation, submission, || self.client.prove_block(block_id, input.clone(), &options))
            .await;

        Ok(outcome)
    }
}

/// Parses a hex encoded `proveBlock` input, with or without `0x` prefix.
pub fn parse_proof_input(hex: &str) -> Result<Bytes, ProofSubmitterError> {
    let hex = hex.trim();
    if hex.is_empty() || hex == "0x" {
        return Err(ProofSubmitterError::InvalidProofInput("empty proof input".into()));
    }
    hex.parse().map_err(|e| ProofSubmitterError::InvalidProofInput(format!("{e}")))
}
