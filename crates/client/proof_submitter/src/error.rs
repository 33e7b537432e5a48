use alloy::primitives::B256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProofSubmitterError {
    #[error("Failed to fetch {what}: {message}")]
    Fetch { what: &'static str, message: String },

    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    #[error("Contract interaction failed: {0}")]
    Contract(String),

    /// A decoded protocol custom error. The message is exactly the error name
    /// (e.g. `L1_ALREADY_PROVEN`) so the `L1_` code convention applies to it.
    #[error("{0}")]
    Reverted(String),

    #[error("Failed to wait till transaction executed: {0}")]
    Confirmation(String),

    #[error("Signer error: {0}")]
    Signer(String),

    #[error("Failed to parse proof input: {0}")]
    InvalidProofInput(String),

    #[error("unretryable proof submission error for block {block_id}: {reason}")]
    Unretryable { block_id: u64, reason: String },
}

impl ProofSubmitterError {
    pub fn fetch(what: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Fetch { what, message: err.to_string() }
    }
}

/// Why a campaign stopped without landing a proof. Neither case is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbandonReason {
    /// The L1 block referenced by the block metadata is no longer canonical.
    Reorged { l1_height: u64, expected: B256, actual: B256 },
    /// Another prover already landed a proof for this block.
    ProvedByAnotherProver,
}
