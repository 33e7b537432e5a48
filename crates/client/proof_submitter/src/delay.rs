//! Economic gating of proof submission.
//!
//! The target delay scales with how the expected reward compares to the current block
//! fee, bounded to `[proof_time_target / 4, proof_time_target * 4]`. The delay is then
//! applied *backwards* from the proposal time: a positive target delay is negated, so the
//! threshold is `proposed_at - target_delay`. This keeps the gate wired while submitting
//! as soon as the reorg and need checks pass.
use crate::types::ProtocolStateVariables;
use std::time::{SystemTime, UNIX_EPOCH};

const PROOF_TIME_TARGET_FACTOR: u64 = 4;

/// Earliest time at which a proof may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// The delay policy is disabled (no expected reward).
    Immediate,
    /// Unix timestamp, in seconds. May lie before the proposal time.
    Timestamp(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayDecision {
    Proceed,
    /// Threshold not reached yet; `seconds` left until it is.
    NeedsWaiting { seconds: u64 },
}

/// Target delay in seconds, before the backwards offset is applied.
pub fn compute_target_delay(expected_reward: u64, state: &ProtocolStateVariables) -> u64 {
    let max_delay = state.proof_time_target.saturating_mul(PROOF_TIME_TARGET_FACTOR);
    if state.block_fee == 0 {
        return max_delay;
    }

    let min_delay = state.proof_time_target / PROOF_TIME_TARGET_FACTOR;
    let delay = (expected_reward as f64 / state.block_fee as f64 * state.proof_time_target as f64) as u64;

    if delay < min_delay {
        min_delay
    } else if delay > max_delay {
        max_delay
    } else {
        delay
    }
}

/// Signed offset (seconds) from the proposal time. Positive target delays are negated.
pub fn delay_offset(target_delay: u64) -> i64 {
    -(target_delay.min(i64::MAX as u64) as i64)
}

pub fn compute_wait_until(proposed_at: u64, expected_reward: u64, state: &ProtocolStateVariables) -> WaitUntil {
    if expected_reward == 0 {
        return WaitUntil::Immediate;
    }

    let proposed_at = i64::try_from(proposed_at).unwrap_or(i64::MAX);
    let offset = delay_offset(compute_target_delay(expected_reward, state));
    WaitUntil::Timestamp(proposed_at.saturating_add(offset))
}

impl WaitUntil {
    /// `now` is a unix timestamp in seconds.
    pub fn decide(&self, now: u64) -> DelayDecision {
        match *self {
            WaitUntil::Immediate => DelayDecision::Proceed,
            WaitUntil::Timestamp(threshold) => {
                let now = i64::try_from(now).unwrap_or(i64::MAX);
                if now < threshold {
                    DelayDecision::NeedsWaiting { seconds: threshold.abs_diff(now) }
                } else {
                    DelayDecision::Proceed
                }
            }
        }
    }

    /// Signed number of seconds from `now` until the threshold, for logging.
    pub fn time_to_wait(&self, now: u64) -> i64 {
        match *self {
            WaitUntil::Immediate => 0,
            WaitUntil::Timestamp(threshold) => threshold.saturating_sub(i64::try_from(now).unwrap_or(i64::MAX)),
        }
    }
}

/// Runs the delay policy for one tick and logs the computed target.
pub fn evaluate(
    block_id: u64,
    proposed_at: u64,
    expected_reward: u64,
    state: &ProtocolStateVariables,
    now: u64,
) -> DelayDecision {
    let wait_until = compute_wait_until(proposed_at, expected_reward, state);
    if let WaitUntil::Timestamp(_) = wait_until {
        tracing::info!(
            block_id,
            delay = delay_offset(compute_target_delay(expected_reward, state)),
            expected_reward,
            block_fee = state.block_fee,
            proof_time_target = state.proof_time_target,
            proposed_at,
            time_to_wait = wait_until.time_to_wait(now),
            "Target delay"
        );
    }
    wait_until.decide(now)
}

pub fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn state(proof_time_target: u64, block_fee: u64) -> ProtocolStateVariables {
        ProtocolStateVariables { proof_time_target, block_fee }
    }

    #[rstest]
    #[case::no_block_fee(1, 0, 100, 400)]
    #[case::clamped_to_min(1, 1_000, 100, 25)]
    #[case::clamped_to_max(1_000, 1, 100, 400)]
    #[case::in_range(2, 1, 100, 200)]
    #[case::fractional(3, 2, 100, 150)]
    #[case::exact_min(1, 4, 100, 25)]
    #[case::exact_max(4, 1, 100, 400)]
    #[case::zero_target(10, 1, 0, 0)]
    fn target_delay_is_clamped(
        #[case] expected_reward: u64,
        #[case] block_fee: u64,
        #[case] proof_time_target: u64,
        #[case] expected: u64,
    ) {
        assert_eq!(compute_target_delay(expected_reward, &state(proof_time_target, block_fee)), expected);
    }

    #[test]
    fn target_delay_never_leaves_bounds() {
        let target = 1_800;
        for reward in [1, 10, 1_000, 100_000, u64::MAX] {
            for fee in [1, 7, 1_000, 1_000_000, u64::MAX] {
                let delay = compute_target_delay(reward, &state(target, fee));
                assert!((target / 4..=target * 4).contains(&delay), "reward {reward} fee {fee} gave {delay}");
            }
        }
    }

    #[test]
    fn no_reward_means_immediate() {
        let wait_until = compute_wait_until(1_000, 0, &state(100, 1));
        assert_eq!(wait_until, WaitUntil::Immediate);
        assert_eq!(wait_until.decide(0), DelayDecision::Proceed);
    }

    #[test]
    fn positive_delay_is_applied_backwards() {
        // target delay = 2 / 1 * 100 = 200s, applied before the proposal time
        let wait_until = compute_wait_until(10_000, 2, &state(100, 1));
        assert_eq!(wait_until, WaitUntil::Timestamp(9_800));

        assert_eq!(wait_until.decide(9_799), DelayDecision::NeedsWaiting { seconds: 1 });
        assert_eq!(wait_until.decide(9_800), DelayDecision::Proceed);
        assert_eq!(wait_until.decide(10_000), DelayDecision::Proceed);
        assert_eq!(wait_until.time_to_wait(10_000), -200);
    }

    #[test]
    fn zero_delay_waits_for_proposal_time() {
        let wait_until = compute_wait_until(10_000, 5, &state(0, 1));
        assert_eq!(wait_until, WaitUntil::Timestamp(10_000));
        assert_eq!(wait_until.decide(9_000), DelayDecision::NeedsWaiting { seconds: 1_000 });
        assert_eq!(wait_until.decide(10_000), DelayDecision::Proceed);
    }

    #[test]
    fn evaluate_proceeds_for_past_proposals() {
        let now = unix_now();
        assert_eq!(evaluate(1, now - 60, 10, &state(1_800, 3), now), DelayDecision::Proceed);
    }
}
