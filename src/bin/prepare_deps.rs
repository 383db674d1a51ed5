//! Duplicate shared source trees into the libadblockplus layout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use abp_prep::{cli, deps};

/// Copy the V8 tree and its sibling dependencies into libadblockplus'
/// third_party directory.
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
    deps::prepare(&checkout)
        .await
        .context("preparing dependencies")?;
    Ok(0)
}
