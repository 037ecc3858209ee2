//! Command line interface for the `tapefeed` binary.

use std::path::PathBuf;

use clap::Parser;

/// Command line arguments for the `tapefeed` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tapefeed",
    version,
    about = "Fetch, gap-fill, and persist the trade packet feed"
)]
pub struct Cli {
    /// Feed server host.
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Feed server port.
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Output path for the assembled JSON dataset.
    #[arg(short, long, default_value = "stock_data.json")]
    pub output: PathBuf,

    /// Deadline for a single recovery fetch, in seconds.
    #[arg(long, default_value_t = 5)]
    pub timeout_secs: u64,

    /// Attempts per missing sequence.
    #[arg(long, default_value_t = 3)]
    pub attempts: u32,
}
