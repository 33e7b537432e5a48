use crate::error::ProofSubmitterError;
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use rand::rngs::OsRng;
use rand::Rng;

// Bounds (in wei) of the random part added to the priority fee. Competing provers
// landing on the exact same tip would keep replacing each other's transactions.
pub const PRIORITY_FEE_RANDOM_MIN: u128 = 1_000_000_000;
pub const PRIORITY_FEE_RANDOM_MAX: u128 = 100_000_000_000;

/// 4000 gwei
pub const PROVE_BLOCK_BASE_PRIORITY_FEE: u128 = 4_000 * 1_000_000_000;
pub const PROVE_BLOCK_GAS_LIMIT: u64 = 1_500_000;

/// Returns `base` plus a value drawn uniformly from
/// `[PRIORITY_FEE_RANDOM_MIN, PRIORITY_FEE_RANDOM_MAX)`.
///
/// The random part comes from the OS CSPRNG so other provers cannot predict it.
pub fn random_priority_fee(base: u128) -> u128 {
    base.saturating_add(OsRng.gen_range(PRIORITY_FEE_RANDOM_MIN..PRIORITY_FEE_RANDOM_MAX))
}

/// Signing and fee options of a `proveBlock` transaction.
#[derive(Debug, Clone)]
pub struct ProveTxOptions {
    pub signer: PrivateKeySigner,
    pub chain_id: u64,
    pub gas_limit: u64,
    pub max_priority_fee_per_gas: u128,
}

impl ProveTxOptions {
    /// Binds `signer` to `chain_id` and picks a fresh random priority fee.
    pub fn new(signer: PrivateKeySigner, chain_id: u64) -> Result<Self, ProofSubmitterError> {
        if chain_id == 0 {
            return Err(ProofSubmitterError::Signer("no chain id specified".into()));
        }

        Ok(Self {
            signer: signer.with_chain_id(Some(chain_id)),
            chain_id,
            gas_limit: PROVE_BLOCK_GAS_LIMIT,
            max_priority_fee_per_gas: random_priority_fee(PROVE_BLOCK_BASE_PRIORITY_FEE),
        })
    }

    pub fn sender(&self) -> Address {
        self.signer.address()
    }

    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

/// Creates [`ProveTxOptions`] from a hex encoded private key.
pub fn build_prove_tx_options(private_key: &str, chain_id: u64) -> Result<ProveTxOptions, ProofSubmitterError> {
    let signer: PrivateKeySigner =
        private_key.parse().map_err(|e| ProofSubmitterError::Signer(format!("invalid private key: {e}")))?;
    ProveTxOptions::new(signer, chain_id)
}
