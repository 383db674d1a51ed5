//! Copy the vendored Android SDK and install the required packages.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use abp_prep::sdk::SdkInstaller;
use abp_prep::{cli, PrepConfig};

/// Install build-tools and platform packages into the private SDK copy.
///
/// The first failing install aborts the rest; its exit code becomes this
/// process's exit code.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Checkout root (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_tracing();
    cli::run_to_exit(run(args)).await
}

async fn run(args: Args) -> anyhow::Result<i32> {
    let checkout = cli::checkout_from(args.root).context("resolving checkout root")?;
    let config = PrepConfig::load(checkout.root())
        .await
        .context("loading configuration")?;

    let code = SdkInstaller::new(checkout)
        .run(&config.sdk.packages)
        .await
        .context("installing build tools")?;
    Ok(code)
}
