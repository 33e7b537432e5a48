use anyhow::Context;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Installs the global subscriber. Filtering is read from `RUST_LOG`, `info` by default.
pub fn init_logging() -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder().with_default_directive(Level::INFO.into()).from_env_lossy();

    let fmt_layer = fmt::layer().with_target(true).with_thread_ids(false);

    Registry::default().with(env_filter).with(fmt_layer).try_init().context("Setting global default subscriber")
}
