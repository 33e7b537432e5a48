//! Decoding of TaikoL1 custom errors.
//!
//! The contract reverts with argument-less custom errors. Nodes hand back only the raw
//! 4-byte selector, so the selector is matched against the known error signatures to
//! recover a name like `L1_ALREADY_PROVEN`.
use crate::error::ProofSubmitterError;
use alloy::contract::Error as ContractError;
use alloy::primitives::{keccak256, Bytes};
use alloy::transports::RpcError;

/// Custom errors the TaikoL1 contract may revert a `proveBlock` call with.
pub const TAIKO_L1_CUSTOM_ERRORS: &[&str] = &[
    "L1_ALREADY_PROVEN()",
    "L1_BLOCK_ID()",
    "L1_EVIDENCE_MISMATCH()",
    "L1_FORK_CHOICE_NOT_FOUND()",
    "L1_INVALID_CONFIG()",
    "L1_INVALID_EVIDENCE()",
    "L1_INVALID_METADATA()",
    "L1_INVALID_PARAM()",
    "L1_INVALID_PROOF()",
    "L1_INVALID_PROOF_OVERWRITE()",
    "L1_NOT_PROVEABLE()",
    "L1_NOT_SPECIAL_PROVER()",
    "L1_ORACLE_PROVER_DISABLED()",
    "L1_SAME_PROOF()",
    "L1_SYSTEM_PROVER_DISABLED()",
    "L1_SYSTEM_PROVER_PROHIBITED()",
    "L1_TX_LIST_NOT_EXIST()",
    "L1_UNEXPECTED_FORK_CHOICE_ID()",
];

/// Name of the custom error whose selector prefixes `revert_data`.
pub fn custom_error_name(revert_data: &[u8]) -> Option<&'static str> {
    let selector = revert_data.get(..4)?;
    TAIKO_L1_CUSTOM_ERRORS
        .iter()
        .find(|signature| &keccak256(signature.as_bytes())[..4] == selector)
        .and_then(|signature| signature.strip_suffix("()"))
}

fn revert_data(err: &ContractError) -> Option<Bytes> {
    let ContractError::TransportError(RpcError::ErrorResp(payload)) = err else {
        return None;
    };
    if let Some(data) = payload.as_revert_data() {
        return Some(data);
    }

    // Some nodes return the selector without an "execution reverted" message.
    let raw = payload.data.as_ref()?;
    raw.get().trim().trim_matches('"').parse().ok()
}

/// Converts a contract call error, replacing known reverts by their custom error name.
pub fn decode_custom_error(err: ContractError) -> ProofSubmitterError {
    if let Some(name) = revert_data(&err).and_then(|data| custom_error_name(&data)) {
        return ProofSubmitterError::Reverted(name.to_string());
    }

    match err {
        ContractError::TransportError(e) => ProofSubmitterError::Rpc(e.to_string()),
        e => ProofSubmitterError::Contract(e.to_string()),
    }
}
