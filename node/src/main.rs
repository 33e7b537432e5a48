//! Proof submitter command line.

mod cli;
mod logging;
mod util;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command, SubmitCmd};
use pv_proof_submitter::eth::EthereumClient;
use pv_proof_submitter::gas::build_prove_tx_options;
use pv_proof_submitter::{parse_proof_input, AbandonReason, SubmissionOutcome, ValidProofSubmitter};
use pv_resilience::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging()?;

    match cli.command {
        Command::Submit(cmd) => submit(cmd).await,
    }
}

async fn submit(cmd: SubmitCmd) -> anyhow::Result<()> {
    let config = cmd.load()?.validate()?;
    let block_id = config.submission.block_id;

    let proof_hex = tokio::fs::read_to_string(&config.proof_file)
        .await
        .with_context(|| format!("Reading proof file {}", config.proof_file.display()))?;
    let input = parse_proof_input(&proof_hex).context("Parsing proof file")?;

    tracing::info!("🔗 L1 endpoint: {}", config.client.l1_rpc_url);
    tracing::info!("📜 TaikoL1 contract: {}", config.client.taiko_l1_address);

    let client = Arc::new(EthereumClient::new(config.client).await.context("Initializing L1 client")?);
    let chain_id = match config.chain_id {
        Some(chain_id) => chain_id,
        None => client.chain_id().await.context("Querying L1 chain id")?,
    };
    tracing::info!("🌐 Chain id: {}", chain_id);
    let prover = build_prove_tx_options(&config.private_key, chain_id).context("Loading prover key")?.sender();
    tracing::info!("👤 Prover: {}", prover);

    let cancellation = CancellationToken::new();
    tokio::spawn({
        let cancellation = cancellation.clone();
        async move {
            util::graceful_shutdown().await;
            tracing::info!("🛑 Shutdown requested, stopping proof submission");
            cancellation.cancel();
        }
    });

    let submitter = ValidProofSubmitter::new(client, config.private_key, chain_id, config.retry_interval);
    let outcome = submitter.submit_proof(&cancellation, &config.submission, input).await?;

    match outcome {
        None => tracing::info!(block_id, "Proof submission cancelled"),
        Some(SubmissionOutcome::Accepted { tx_hash, attempts }) => {
            tracing::info!(block_id, tx_hash = %tx_hash, attempts, "✅ Proof submission done")
        }
        Some(SubmissionOutcome::Abandoned(AbandonReason::Reorged { l1_height, expected, actual })) => tracing::info!(
            block_id,
            l1_height,
            expected = %expected,
            actual = %actual,
            "Proof submission abandoned, the proposal was reorged out"
        ),
        Some(SubmissionOutcome::Abandoned(AbandonReason::ProvedByAnotherProver)) => {
            tracing::info!(block_id, "Proof submission abandoned, the block was proved by another prover")
        }
        Some(outcome @ SubmissionOutcome::Unretryable { .. }) => {
            outcome.into_result(block_id).context("Submitting block proof")?;
        }
    }

    Ok(())
}
