use alloy::primitives::B256;

/// L1 anchor of a proposed block, recorded at proposal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMetadata {
    /// L1 block number at which the block was proposed
    pub l1_height: u64,
    /// Expected canonical hash of the L1 block at `l1_height`
    pub l1_hash: B256,
}

/// Snapshot of the protocol's economic state, read from L1 on every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProtocolStateVariables {
    /// Target proof turnaround, in seconds
    pub proof_time_target: u64,
    /// Current per-block fee unit
    pub block_fee: u64,
}

/// Input of one proof submission campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofSubmission {
    pub block_id: u64,
    /// Unix timestamp (seconds) of the block proposal
    pub proposed_at: u64,
    /// `0` disables the need check and the delay policy
    pub expected_reward: u64,
    pub meta: BlockMetadata,
}
