pub mod error;

pub use error::{custom_error_name, decode_custom_error, TAIKO_L1_CUSTOM_ERRORS};

use crate::client::L1ProofClient;
use crate::error::ProofSubmitterError;
use crate::eth::TaikoL1::{ForkChoice, TaikoL1Instance};
use crate::gas::ProveTxOptions;
use crate::types::ProtocolStateVariables;
use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::providers::{Provider, ProviderBuilder, ReqwestProvider, RootProvider};
use alloy::rpc::types::BlockTransactionsKind;
use alloy::sol;
use alloy::transports::http::{Client, Http};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

sol!(
    #[sol(rpc)]
    #[derive(Debug)]
    contract TaikoL1 {
        struct StateVariables {
            uint64 blockFee;
            uint64 accBlockFees;
            uint64 genesisHeight;
            uint64 genesisTimestamp;
            uint64 numBlocks;
            uint64 proofTimeIssued;
            uint64 proofTimeTarget;
            uint64 lastVerifiedBlockId;
            uint64 accProposedAt;
            uint64 nextEthDepositToProcess;
            uint64 numEthDeposits;
        }

        struct ForkChoice {
            bytes32 key;
            bytes32 blockHash;
            bytes32 signalRoot;
            uint64 provenAt;
            address prover;
            uint32 gasUsed;
        }

        function getStateVariables() external view returns (StateVariables memory);

        function getForkChoice(uint256 blockId, bytes32 parentHash, uint32 parentGasUsed)
            external
            view
            returns (ForkChoice memory);

        function proveBlock(uint256 blockId, bytes calldata input) external;
    }
);

pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Debug)]
pub struct EthereumClientConfig {
    pub l1_rpc_url: Url,
    pub l2_rpc_url: Url,
    pub taiko_l1_address: Address,
    pub receipt_poll_interval: Duration,
    pub receipt_timeout: Duration,
}

impl EthereumClientConfig {
    pub fn new(l1_rpc_url: Url, l2_rpc_url: Url, taiko_l1_address: Address) -> Self {
        Self {
            l1_rpc_url,
            l2_rpc_url,
            taiko_l1_address,
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
        }
    }
}

pub struct EthereumClient {
    pub l1_provider: Arc<ReqwestProvider>,
    pub l2_provider: Arc<ReqwestProvider>,
    pub taiko_l1: TaikoL1Instance<Http<Client>, RootProvider<Http<Client>>>,
    config: EthereumClientConfig,
}

impl Clone for EthereumClient {
    fn clone(&self) -> Self {
        EthereumClient {
            l1_provider: Arc::clone(&self.l1_provider),
            l2_provider: Arc::clone(&self.l2_provider),
            taiko_l1: self.taiko_l1.clone(),
            config: self.config.clone(),
        }
    }
}

impl EthereumClient {
    pub async fn new(config: EthereumClientConfig) -> Result<Self, ProofSubmitterError> {
        let client = Self::new_unchecked(config);
        // Check if contract exists
        let code = client
            .l1_provider
            .get_code_at(client.config.taiko_l1_address)
            .await
            .map_err(|e| ProofSubmitterError::Rpc(e.to_string()))?;
        if code.is_empty() {
            return Err(ProofSubmitterError::Contract("TaikoL1 contract not found at given address".into()));
        }

        Ok(client)
    }

    pub(crate) fn new_unchecked(config: EthereumClientConfig) -> Self {
        let l1_provider = ProviderBuilder::new().on_http(config.l1_rpc_url.clone());
        let l2_provider = ProviderBuilder::new().on_http(config.l2_rpc_url.clone());
        let taiko_l1 = TaikoL1::new(config.taiko_l1_address, l1_provider.clone());
        Self { l1_provider: Arc::new(l1_provider), l2_provider: Arc::new(l2_provider), taiko_l1, config }
    }

    pub fn config(&self) -> &EthereumClientConfig {
        &self.config
    }

    pub async fn chain_id(&self) -> Result<u64, ProofSubmitterError> {
        self.l1_provider.get_chain_id().await.map_err(|e| ProofSubmitterError::fetch("L1 chain id", e))
    }

    /// Sends `TaikoL1.proveBlock(block_id, input)` signed with the options' signer.
    ///
    /// Only submits; confirmation is left to [`L1ProofClient::wait_receipt`].
    pub async fn prove_block(
        &self,
        block_id: u64,
        input: Bytes,
        options: &ProveTxOptions,
    ) -> Result<TxHash, ProofSubmitterError> {
        // The fee cap follows the tip: 2 * base fee + tip.
        let estimate =
            self.l1_provider.estimate_eip1559_fees(None).await.map_err(|e| ProofSubmitterError::Rpc(e.to_string()))?;
        let base_fee_part = estimate.max_fee_per_gas.saturating_sub(estimate.max_priority_fee_per_gas);
        let max_fee_per_gas = base_fee_part.saturating_add(options.max_priority_fee_per_gas);

        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(options.wallet())
            .on_http(self.config.l1_rpc_url.clone());
        let taiko_l1 = TaikoL1::new(self.config.taiko_l1_address, provider);

        let pending = taiko_l1
            .proveBlock(U256::from(block_id), input)
            .from(options.sender())
            .gas(options.gas_limit)
            .max_priority_fee_per_gas(options.max_priority_fee_per_gas)
            .max_fee_per_gas(max_fee_per_gas)
            .send()
            .await
            .map_err(decode_custom_error)?;

        let tx_hash = *pending.tx_hash();
        tracing::debug!(
            block_id,
            tx_hash = %tx_hash,
            gas_limit = options.gas_limit,
            max_priority_fee_per_gas = options.max_priority_fee_per_gas,
            "proveBlock transaction sent"
        );
        Ok(tx_hash)
    }
}

/// Interprets the outcome of a `getForkChoice` read.
pub fn proof_needed(
    fork_choice: Result<ForkChoice, ProofSubmitterError>,
    prover: Address,
) -> Result<bool, ProofSubmitterError> {
    match fork_choice {
        Ok(fork_choice) => {
            if fork_choice.prover == Address::ZERO {
                return Ok(true);
            }
            Ok(prover != Address::ZERO && fork_choice.prover != prover)
        }
        Err(ProofSubmitterError::Reverted(name)) if name == "L1_FORK_CHOICE_NOT_FOUND" => Ok(true),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl L1ProofClient for EthereumClient {
    async fn l1_block_hash(&self, l1_height: u64) -> Result<B256, ProofSubmitterError> {
        let block = self
            .l1_provider
            .get_block_by_number(BlockNumberOrTag::Number(l1_height), BlockTransactionsKind::Hashes)
            .await
            .map_err(|e| ProofSubmitterError::fetch("L1 block", e))?
            .ok_or_else(|| ProofSubmitterError::fetch("L1 block", format!("block {l1_height} not found")))?;

        Ok(block.header.hash)
    }

    async fn need_new_proof(&self, block_id: u64, prover: Address) -> Result<bool, ProofSubmitterError> {
        let parent_id = block_id
            .checked_sub(1)
            .ok_or_else(|| ProofSubmitterError::InvalidProofInput("the genesis block has no parent".into()))?;
        let parent = self
            .l2_provider
            .get_block_by_number(BlockNumberOrTag::Number(parent_id), BlockTransactionsKind::Hashes)
            .await
            .map_err(|e| ProofSubmitterError::fetch("L2 parent block", e))?
            .ok_or_else(|| ProofSubmitterError::fetch("L2 parent block", format!("block {parent_id} not found")))?;
        let parent_gas_used = u32::try_from(parent.header.gas_used)
            .map_err(|_| ProofSubmitterError::fetch("L2 parent block", "gas used does not fit in uint32"))?;

        let fork_choice = self
            .taiko_l1
            .getForkChoice(U256::from(block_id), parent.header.hash, parent_gas_used)
            .call()
            .await
            .map(|fork_choice| fork_choice._0)
            .map_err(decode_custom_error);

        proof_needed(fork_choice, prover)
    }

    async fn protocol_state_variables(&self) -> Result<ProtocolStateVariables, ProofSubmitterError> {
        let state = self
            .taiko_l1
            .getStateVariables()
            .call()
            .await
            .map_err(|e| ProofSubmitterError::fetch("protocol state variables", e))?
            ._0;

        Ok(ProtocolStateVariables {
            proof_time_target: state.proofTimeTarget,
            block_fee: state.blockFee,
        })
    }

    async fn wait_receipt(&self, tx_hash: TxHash) -> Result<(), ProofSubmitterError> {
        let poll = async {
            loop {
                match self.l1_provider.get_transaction_receipt(tx_hash).await {
                    Ok(Some(receipt)) => return receipt,
                    Ok(None) => {}
                    Err(e) => tracing::debug!(tx_hash = %tx_hash, error = %e, "Failed to fetch transaction receipt"),
                }
                tokio::time::sleep(self.config.receipt_poll_interval).await;
            }
        };

        let receipt = tokio::time::timeout(self.config.receipt_timeout, poll).await.map_err(|_| {
            ProofSubmitterError::Confirmation(format!(
                "transaction {tx_hash} not mined after {:?}",
                self.config.receipt_timeout
            ))
        })?;

        if !receipt.status() {
            return Err(ProofSubmitterError::Confirmation(format!("transaction {tx_hash} reverted")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod eth_client_tests {
    use super::*;
    use alloy::sol_types::SolType;
    use assert_matches::assert_matches;
    use httpmock::prelude::*;
    use rstest::rstest;

    const TAIKO_L1_ADDRESS: &str = "0x6375394335f34848b850114b66A49D6F47f2cdA8";

    fn create_ethereum_client(server: &MockServer) -> EthereumClient {
        let url: Url = server.base_url().parse().expect("issue while parsing URL");
        let address: Address = TAIKO_L1_ADDRESS.parse().unwrap();
        let mut config = EthereumClientConfig::new(url.clone(), url, address);
        config.receipt_poll_interval = Duration::from_millis(10);
        config.receipt_timeout = Duration::from_millis(200);
        EthereumClient::new_unchecked(config)
    }

    fn fork_choice(prover: Address) -> ForkChoice {
        ForkChoice {
            key: B256::ZERO,
            blockHash: B256::repeat_byte(1),
            signalRoot: B256::repeat_byte(2),
            provenAt: 1_700_000_000,
            prover,
            gasUsed: 21_000,
        }
    }

    #[rstest]
    #[case::unproven_any(Address::ZERO, Address::ZERO, true)]
    #[case::proven_any(Address::repeat_byte(0xaa), Address::ZERO, false)]
    #[case::proven_by_us(Address::repeat_byte(0xaa), Address::repeat_byte(0xaa), false)]
    #[case::proven_by_other(Address::repeat_byte(0xaa), Address::repeat_byte(0xbb), true)]
    fn proof_needed_by_fork_choice_prover(#[case] existing: Address, #[case] filter: Address, #[case] needed: bool) {
        assert_eq!(proof_needed(Ok(fork_choice(existing)), filter).unwrap(), needed);
    }

    #[test]
    fn missing_fork_choice_needs_proof() {
        let result = Err(ProofSubmitterError::Reverted("L1_FORK_CHOICE_NOT_FOUND".into()));
        assert!(proof_needed(result, Address::ZERO).unwrap());
    }

    #[test]
    fn other_fork_choice_errors_are_propagated() {
        let result = Err(ProofSubmitterError::Rpc("connection refused".into()));
        assert_matches!(proof_needed(result, Address::ZERO), Err(ProofSubmitterError::Rpc(_)));
    }

    #[tokio::test]
    async fn l1_block_hash_server_error_is_a_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/").body_contains("eth_getBlockByNumber");
            then.status(500).json_body_obj(&serde_json::json!({
                "jsonrpc": "2.0",
                "error": { "code": -32000, "message": "Internal Server Error" },
                "id": 0
            }));
        });

        let client = create_ethereum_client(&server);
        let err = client.l1_block_hash(100).await.unwrap_err();
        assert_matches!(err, ProofSubmitterError::Fetch { what: "L1 block", .. });
    }

    #[tokio::test]
    async fn l1_block_hash_missing_block_is_a_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/").body_contains("eth_getBlockByNumber");
            then.status(200).json_body_obj(&serde_json::json!({"jsonrpc": "2.0", "id": 0, "result": null}));
        });

        let client = create_ethereum_client(&server);
        assert_matches!(
            client.l1_block_hash(100).await,
            Err(ProofSubmitterError::Fetch { message, .. }) if message.contains("not found")
        );
    }

    #[tokio::test]
    async fn protocol_state_variables_works() {
        let state = TaikoL1::StateVariables {
            blockFee: 1_024,
            accBlockFees: 0,
            genesisHeight: 1,
            genesisTimestamp: 1_700_000_000,
            numBlocks: 42,
            proofTimeIssued: 0,
            proofTimeTarget: 1_800,
            lastVerifiedBlockId: 40,
            accProposedAt: 0,
            nextEthDepositToProcess: 0,
            numEthDeposits: 0,
        };
        let result = Bytes::from(<TaikoL1::StateVariables as SolType>::abi_encode(&state));

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/").body_contains("eth_call");
            then.status(200).json_body_obj(&serde_json::json!({"jsonrpc": "2.0", "id": 0, "result": result}));
        });

        let client = create_ethereum_client(&server);
        let state = client.protocol_state_variables().await.expect("state variables should decode");
        assert_eq!(state, ProtocolStateVariables { proof_time_target: 1_800, block_fee: 1_024 });
    }

    #[tokio::test]
    async fn wait_receipt_times_out_when_never_mined() {
        let server = MockServer::start();
        let receipt_mock = server.mock(|when, then| {
            when.method(POST).path("/").body_contains("eth_getTransactionReceipt");
            then.status(200).json_body_obj(&serde_json::json!({"jsonrpc": "2.0", "id": 0, "result": null}));
        });

        let client = create_ethereum_client(&server);
        assert_matches!(
            client.wait_receipt(TxHash::repeat_byte(0x33)).await,
            Err(ProofSubmitterError::Confirmation(message)) if message.contains("not mined")
        );
        assert!(receipt_mock.hits() > 1, "receipt should be polled more than once");
    }

    #[tokio::test]
    async fn need_new_proof_rejects_genesis() {
        let server = MockServer::start();
        let client = create_ethereum_client(&server);
        assert_matches!(client.need_new_proof(0, Address::ZERO).await, Err(ProofSubmitterError::InvalidProofInput(_)));
    }
}
