//! Proof submission campaigns.
//!
//! A campaign tries to land one proof for one block. Each tick runs, in order:
//!
//! 1. **Cancellation check**: a cancelled campaign ends silently.
//! 2. **Reorg guard**: the L1 anchor of the block must still be canonical.
//! 3. **Need check and delay policy** (only when an expected reward is set).
//! 4. **Submission** through the caller supplied closure.
//! 5. **Confirmation** of the submitted transaction.
//!
//! Transient failures schedule another tick after a constant interval. There is no
//! attempt cap: only a terminal outcome or the cancellation token ends a campaign.
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, TxHash};
use pv_resilience::{CancellationToken, RetryConfig, RetryState};

use crate::classifier::{is_submit_proof_tx_error_retryable, ErrorCode};
use crate::client::L1ProofClient;
use crate::delay::{self, DelayDecision};
use crate::error::{AbandonReason, ProofSubmitterError};
use crate::reorg::{check_canonical, CanonicalStatus};
use crate::types::ProofSubmission;

/// Terminal result of a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The proof transaction was mined successfully.
    Accepted { tx_hash: TxHash, attempts: usize },
    /// The campaign stopped without submitting; not an error.
    Abandoned(AbandonReason),
    /// The protocol rejected the proof permanently.
    Unretryable { attempts: usize, reason: String },
}

impl SubmissionOutcome {
    /// Maps [`SubmissionOutcome::Unretryable`] to [`ProofSubmitterError::Unretryable`].
    pub fn into_result(self, block_id: u64) -> Result<(), ProofSubmitterError> {
        match self {
            SubmissionOutcome::Accepted { .. } | SubmissionOutcome::Abandoned(_) => Ok(()),
            SubmissionOutcome::Unretryable { reason, .. } => Err(ProofSubmitterError::Unretryable { block_id, reason }),
        }
    }
}

/// Why a tick did not end the campaign.
#[derive(Debug)]
enum RetryReason {
    Fetch(ProofSubmitterError),
    NeedsWaiting { seconds: u64 },
    Submission(String),
    Confirmation(ProofSubmitterError),
}

impl std::fmt::Display for RetryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetryReason::Fetch(e) | RetryReason::Confirmation(e) => write!(f, "{e}"),
            RetryReason::NeedsWaiting { seconds } => write!(f, "target delay not reached, {seconds}s left"),
            RetryReason::Submission(reason) => write!(f, "{reason}"),
        }
    }
}

enum Tick {
    Done(SubmissionOutcome),
    Retry(RetryReason),
}

pub struct SubmissionCoordinator {
    client: Arc<dyn L1ProofClient>,
    retry_config: RetryConfig,
}

impl SubmissionCoordinator {
    pub fn new(client: Arc<dyn L1ProofClient>, retry_interval: Duration) -> Self {
        Self { client, retry_config: RetryConfig::with_interval(retry_interval) }
    }

    /// Runs a submission campaign until it reaches a terminal outcome.
    ///
    /// `send_tx` is called at most once per tick and returns the hash of the submitted
    /// transaction. Returns `None` if `cancellation` fired before a terminal outcome; an
    /// in-flight chain call is never interrupted, cancellation is observed between ticks.
    pub async fn send_tx_with_backoff<F, Fut, E>(
        &self,
        cancellation: &CancellationToken,
        submission: &ProofSubmission,
        mut send_tx: F,
    ) -> Option<SubmissionOutcome>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<TxHash, E>>,
        E: ErrorCode,
    {
        let block_id = submission.block_id;
        let mut retry_state = RetryState::new(self.retry_config.clone());
        let mut attempts = 0;

        loop {
            if cancellation.is_cancelled() {
                tracing::debug!(block_id, "Proof submission cancelled");
                return None;
            }

            match self.tick(submission, &mut send_tx, &mut attempts).await {
                Tick::Done(outcome) => return Some(outcome),
                Tick::Retry(reason) => {
                    let retries = retry_state.increment_retry();
                    tracing::trace!(block_id, retries, reason = %reason, "Scheduling proof submission retry");
                    if !matches!(reason, RetryReason::NeedsWaiting { .. }) && retry_state.should_log() {
                        tracing::warn!(
                            block_id,
                            retries,
                            elapsed = ?retry_state.elapsed(),
                            "⏳ Proof submission still retrying"
                        );
                    }
                }
            }

            if !retry_state.wait_next_tick(cancellation).await {
                tracing::debug!(block_id, "Proof submission cancelled");
                return None;
            }
        }
    }

    async fn tick<F, Fut, E>(&self, submission: &ProofSubmission, send_tx: &mut F, attempts: &mut usize) -> Tick
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<TxHash, E>>,
        E: ErrorCode,
    {
        let block_id = submission.block_id;

        match check_canonical(self.client.as_ref(), block_id, &submission.meta).await {
            Ok(CanonicalStatus::Canonical) => {}
            Ok(CanonicalStatus::Reorged { actual }) => {
                return Tick::Done(SubmissionOutcome::Abandoned(AbandonReason::Reorged {
                    l1_height: submission.meta.l1_height,
                    expected: submission.meta.l1_hash,
                    actual,
                }))
            }
            Err(e) => return Tick::Retry(RetryReason::Fetch(e)),
        }

        if submission.expected_reward != 0 {
            // zero address: proofs by any prover count
            match self.client.need_new_proof(block_id, Address::ZERO).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::info!(block_id, "Proof was submitted by another prover, skip the current proof submission");
                    return Tick::Done(SubmissionOutcome::Abandoned(AbandonReason::ProvedByAnotherProver));
                }
                Err(e) => {
                    tracing::warn!(block_id, error = %e, "Failed to check if the generated proof is needed");
                    return Tick::Retry(RetryReason::Fetch(e));
                }
            }

            let state = match self.client.protocol_state_variables().await {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(block_id, error = %e, "Failed to get protocol state variables");
                    return Tick::Retry(RetryReason::Fetch(e));
                }
            };

            let decision = delay::evaluate(
                block_id,
                submission.proposed_at,
                submission.expected_reward,
                &state,
                delay::unix_now(),
            );
            if let DelayDecision::NeedsWaiting { seconds } = decision {
                return Tick::Retry(RetryReason::NeedsWaiting { seconds });
            }
        }

        *attempts += 1;
        let tx_hash = match send_tx().await {
            Ok(tx_hash) => tx_hash,
            Err(e) => {
                if is_submit_proof_tx_error_retryable(&e, block_id) {
                    let reason = e.error_code();
                    tracing::info!(block_id, reason = %reason, "Retry sending proveBlock transaction");
                    return Tick::Retry(RetryReason::Submission(reason));
                }
                return Tick::Done(SubmissionOutcome::Unretryable { attempts: *attempts, reason: e.error_code() });
            }
        };

        if let Err(e) = self.client.wait_receipt(tx_hash).await {
            tracing::warn!(block_id, tx_hash = %tx_hash, error = %e, "Failed to wait till transaction executed");
            return Tick::Retry(RetryReason::Confirmation(e));
        }

        tracing::info!(block_id, proposed_at = submission.proposed_at, tx_hash = %tx_hash, "💰 Your block proof was accepted");
        Tick::Done(SubmissionOutcome::Accepted { tx_hash, attempts: *attempts })
    }
}
