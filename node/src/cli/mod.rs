use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::{Address, B256};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use figment::{
    providers::{Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use pv_proof_submitter::eth::EthereumClientConfig;
use pv_proof_submitter::{BlockMetadata, ProofSubmission};
use serde::{Deserialize, Serialize};

pub mod l1;
pub mod proof;

pub use l1::L1Params;
pub use proof::ProofParams;

#[derive(Debug, Parser)]
#[clap(name = "proof-submitter", version, about = "Lands block proofs on L1")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit one block proof, retrying until it is accepted, abandoned or rejected by the protocol.
    Submit(SubmitCmd),
}

#[derive(Clone, Debug, clap::Args, Deserialize, Serialize)]
pub struct SubmitCmd {
    /// Load arguments from a `toml`, `json` or `yaml` file. Values found in the file override
    /// the command line ones.
    #[clap(env = "PROOF_SUBMITTER_CONFIG_FILE", long, value_name = "PATH")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,

    #[clap(flatten)]
    pub l1_params: L1Params,

    #[clap(flatten)]
    pub proof_params: ProofParams,
}

/// Validated arguments of a `submit` run.
#[derive(Debug)]
pub struct SubmitConfig {
    pub client: EthereumClientConfig,
    pub private_key: String,
    pub chain_id: Option<u64>,
    pub retry_interval: Duration,
    pub submission: ProofSubmission,
    pub proof_file: PathBuf,
}

impl SubmitCmd {
    /// Merges the config file, if any, over the command line arguments.
    pub fn load(self) -> anyhow::Result<SubmitCmd> {
        let Some(config_path) = self.config_file.clone() else {
            return Ok(self);
        };

        let config = Figment::new().merge(Serialized::defaults(&self));
        let config = match config_path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => config.merge(Toml::file(&config_path)),
            Some("json") => config.merge(Json::file(&config_path)),
            Some("yaml") => config.merge(Yaml::file(&config_path)),
            _ => bail!("Unsupported file type for config file."),
        };

        let mut cmd: SubmitCmd =
            config.extract().with_context(|| format!("Loading config file {}", config_path.display()))?;
        cmd.config_file = Some(config_path);
        Ok(cmd)
    }

    pub fn validate(&self) -> anyhow::Result<SubmitConfig> {
        let l1 = &self.l1_params;
        let proof = &self.proof_params;

        let l1_endpoint = l1.l1_endpoint.clone().context("Missing L1 endpoint, use `--l1-endpoint`")?;
        let l2_endpoint = l1.l2_endpoint.clone().context("Missing L2 endpoint, use `--l2-endpoint`")?;
        let taiko_l1_address: Address = l1
            .taiko_l1_address
            .as_deref()
            .context("Missing TaikoL1 address, use `--taiko-l1-address`")?
            .parse()
            .context("Parsing TaikoL1 address")?;
        let private_key = l1.private_key.clone().context("Missing prover private key, use `--private-key`")?;

        let block_id = proof.block_id.context("Missing block id, use `--block-id`")?;
        if block_id == 0 {
            bail!("The genesis block (`--block-id 0`) cannot be proved");
        }
        let proposed_at = proof.proposed_at.context("Missing proposal time, use `--proposed-at`")?;
        let l1_height = proof.l1_height.context("Missing L1 height, use `--l1-height`")?;
        let l1_hash: B256 = proof
            .l1_hash
            .as_deref()
            .context("Missing L1 hash, use `--l1-hash`")?
            .parse()
            .context("Parsing L1 hash")?;
        let proof_file = proof.proof_file.clone().context("Missing proof file, use `--proof-file`")?;

        let mut client = EthereumClientConfig::new(l1_endpoint, l2_endpoint, taiko_l1_address);
        client.receipt_poll_interval = l1.receipt_poll_interval;
        client.receipt_timeout = l1.receipt_timeout;

        Ok(SubmitConfig {
            client,
            private_key,
            chain_id: l1.chain_id,
            retry_interval: l1.retry_interval,
            submission: ProofSubmission {
                block_id,
                proposed_at,
                expected_reward: proof.expected_reward,
                meta: BlockMetadata { l1_height, l1_hash },
            },
            proof_file,
        })
    }
}
