//! Binary entry point: run the full feed pipeline and persist the dataset.
//!
//! All file and console I/O lives here; the library core only hands back an
//! in-memory ordered collection.

mod cli;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tapefeed::{FeedClient, FeedConfig, RetryPolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = cli::Cli::parse();
    let addr = tokio::net::lookup_host((cli.host.as_str(), cli.port))
        .await
        .with_context(|| format!("failed to resolve {}:{}", cli.host, cli.port))?
        .next()
        .with_context(|| format!("no addresses for {}:{}", cli.host, cli.port))?;

    let config = FeedConfig::new(addr)
        .recovery_timeout(Duration::from_secs(cli.timeout_secs))
        .retry(RetryPolicy::default().max_attempts(cli.attempts));
    let client = FeedClient::new(config);

    tracing::info!(%addr, "requesting all packets");
    let outcome = client.run().await.context("stream-all exchange failed")?;

    if !outcome.unrecovered.is_empty() {
        tracing::warn!(sequences = ?outcome.unrecovered, "recovery exhausted retries");
    }
    if !outcome.unrequestable.is_empty() {
        tracing::warn!(sequences = ?outcome.unrequestable, "sequences beyond resend range");
    }
    if !outcome.dataset.is_complete() {
        tracing::warn!(missing = ?outcome.dataset.missing, "final dataset is incomplete");
    }

    let json = serde_json::to_vec_pretty(&outcome.dataset.packets)
        .context("failed to serialize dataset")?;
    std::fs::write(&cli.output, json)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    tracing::info!(
        path = %cli.output.display(),
        packets = outcome.dataset.packets.len(),
        "dataset saved"
    );
    Ok(())
}
