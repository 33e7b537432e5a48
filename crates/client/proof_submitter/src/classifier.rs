//! Retryable vs. unretryable classification of proof submission errors.
//!
//! Protocol rejections surface as revert reasons named `L1_*` (already proven, invalid
//! proof, ...). Those are permanent: retrying the same transaction cannot succeed. Every
//! other failure (transport, timeout, nonce, gas) is treated as transient.

/// Prefix of protocol-level rejection codes.
pub const UNRETRYABLE_ERROR_PREFIX: &str = "L1_";

/// Normalized error code of a submission error.
///
/// Errors coming back from the contract are decoded into their custom error name first
/// (see [`crate::eth::decode_custom_error`]), so the code of any error is simply its
/// top-level message.
pub trait ErrorCode {
    fn error_code(&self) -> String;
}

impl<E: std::fmt::Display + ?Sized> ErrorCode for E {
    fn error_code(&self) -> String {
        self.to_string()
    }
}

/// An error is unretryable iff its code starts with [`UNRETRYABLE_ERROR_PREFIX`].
pub fn is_retryable<E: ErrorCode + ?Sized>(err: &E) -> bool {
    !err.error_code().starts_with(UNRETRYABLE_ERROR_PREFIX)
}

/// Same as [`is_retryable`], also recording unretryable classifications.
pub fn is_submit_proof_tx_error_retryable<E: ErrorCode + ?Sized>(err: &E, block_id: u64) -> bool {
    if is_retryable(err) {
        return true;
    }

    tracing::warn!(block_id, error = %err.error_code(), "🤷 Unretryable proof submission error");
    false
}
