//! Proof submitter. This crate lands block proofs on L1, retrying until the proof is
//! accepted, no longer worth submitting, or rejected by the protocol.
//!
//! # Overview
//!
//! A proof for a proposed block is submitted through a *campaign*, driven by the
//! [`SubmissionCoordinator`]. A campaign is a cooperative loop ticking on a constant
//! interval; every tick re-validates the world before sending anything:
//!
//! 1. **Reorg guard**: the L1 block the proposal was anchored to must still be
//!    canonical. If it was reorged out the campaign is abandoned.
//! 2. **Need check**: when reward tracking is enabled, a proof landed by any other
//!    prover ends the campaign.
//! 3. **Delay policy**: the protocol's fee and proof time target decide how long after
//!    the proposal the proof may be sent.
//! 4. **Submission and confirmation** of the `proveBlock` transaction.
//!
//! # Error classification
//!
//! Protocol rejections are reported as custom errors named `L1_*`. They are decoded
//! from revert data by [`eth::decode_custom_error`] and are terminal. Any other
//! failure is transient and only schedules another tick. Campaigns have no attempt
//! cap: they run until a terminal [`SubmissionOutcome`] or until their
//! [`CancellationToken`] is cancelled.
//!
//! # Chain access
//!
//! The coordinator only depends on the [`L1ProofClient`] trait, so it can be driven by
//! mocks in tests. [`eth::EthereumClient`] implements it over JSON-RPC with `alloy`.
pub mod classifier;
pub mod client;
pub mod coordinator;
pub mod delay;
pub mod error;
pub mod eth;
pub mod gas;
pub mod reorg;
pub mod submitter;
pub mod types;

pub use client::L1ProofClient;
pub use coordinator::{SubmissionCoordinator, SubmissionOutcome};
pub use error::{AbandonReason, ProofSubmitterError};
pub use pv_resilience::CancellationToken;
pub use submitter::{parse_proof_input, ValidProofSubmitter};
pub use types::{BlockMetadata, ProofSubmission, ProtocolStateVariables};
