use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The block proof to land, and the proposal it proves.
#[derive(Clone, Debug, clap::Args, Deserialize, Serialize)]
pub struct ProofParams {
    /// Id of the proven block.
    #[clap(env = "PROOF_SUBMITTER_BLOCK_ID", long)]
    pub block_id: Option<u64>,

    /// Unix timestamp (seconds) at which the block was proposed.
    #[clap(env = "PROOF_SUBMITTER_PROPOSED_AT", long)]
    pub proposed_at: Option<u64>,

    /// Reward expected for the proof. `0` submits as soon as the reorg check passes,
    /// without checking whether another prover already proved the block.
    #[clap(env = "PROOF_SUBMITTER_EXPECTED_REWARD", long, default_value_t = 0)]
    pub expected_reward: u64,

    /// L1 block number the block was proposed at.
    #[clap(env = "PROOF_SUBMITTER_L1_HEIGHT", long)]
    pub l1_height: Option<u64>,

    /// Hash of the L1 block the block was proposed at.
    #[clap(env = "PROOF_SUBMITTER_L1_HASH", long, value_name = "HASH")]
    pub l1_hash: Option<String>,

    /// File holding the hex encoded `proveBlock` input.
    #[clap(env = "PROOF_SUBMITTER_PROOF_FILE", long, value_name = "PATH")]
    pub proof_file: Option<PathBuf>,
}
