use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::util::{deserialize_duration, parse_duration, parse_url, serialize_duration};

#[derive(Clone, Debug, clap::Args, Deserialize, Serialize)]
pub struct L1Params {
    /// The L1 rpc endpoint url, where the TaikoL1 contract lives and proofs are submitted.
    #[clap(env = "PROOF_SUBMITTER_L1_ENDPOINT", long, value_parser = parse_url, value_name = "ETHEREUM RPC URL")]
    pub l1_endpoint: Option<Url>,

    /// The L2 rpc endpoint url. Used to read the parent header of a proven block.
    #[clap(env = "PROOF_SUBMITTER_L2_ENDPOINT", long, value_parser = parse_url, value_name = "L2 RPC URL")]
    pub l2_endpoint: Option<Url>,

    /// Address of the TaikoL1 contract.
    #[clap(env = "PROOF_SUBMITTER_TAIKO_L1_ADDRESS", long, value_name = "ADDRESS")]
    pub taiko_l1_address: Option<String>,

    /// Hex encoded private key of the prover account.
    #[clap(env = "PROOF_SUBMITTER_PRIVATE_KEY", long, hide_env_values = true, value_name = "HEX")]
    pub private_key: Option<String>,

    /// L1 chain id the proof transactions are signed for. Queried from the L1 endpoint when
    /// omitted.
    #[clap(env = "PROOF_SUBMITTER_CHAIN_ID", long)]
    pub chain_id: Option<u64>,

    /// Interval between two submission attempts.
    #[clap(env = "PROOF_SUBMITTER_RETRY_INTERVAL", long, default_value = "12s", value_parser = parse_duration)]
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub retry_interval: Duration,

    /// Polling interval while waiting for a transaction receipt.
    #[clap(env = "PROOF_SUBMITTER_RECEIPT_POLL_INTERVAL", long, default_value = "1s", value_parser = parse_duration)]
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub receipt_poll_interval: Duration,

    /// How long to wait for a submitted transaction to be mined before resubmitting.
    #[clap(env = "PROOF_SUBMITTER_RECEIPT_TIMEOUT", long, default_value = "5min", value_parser = parse_duration)]
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub receipt_timeout: Duration,
}
