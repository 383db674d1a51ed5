//! Fetch and unpack the pinned Android NDK archive.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use abp_prep::ndk::NdkFetcher;
use abp_prep::{cli, PrepConfig};

/// Download the Android NDK into the libadblockplus third_party directory.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Checkout root (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Override the archive URL
    #[arg(long)]
    url: Option<String>,

    /// Expected SHA-256 of the archive
    #[arg(long)]
    sha256: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_tracing();
    cli::run_to_exit(run(args)).await
}

async fn run(args: Args) -> anyhow::Result<i32> {
    let checkout = cli::checkout_from(args.root).context("resolving checkout root")?;

    let mut config = PrepConfig::load(checkout.root())
        .await
        .context("loading configuration")?;
    if let Some(url) = args.url {
        config.ndk.url = url;
    }
    if let Some(sha256) = args.sha256 {
        config.ndk.sha256 = Some(sha256);
    }

    NdkFetcher::new(checkout, config.ndk)
        .fetch()
        .await
        .context("fetching the NDK")?;
    Ok(0)
}
