//! Remove a directory tree if it exists.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use abp_prep::{cli, fsops};

/// Delete the directory tree at PATH; succeeds when PATH does not exist.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Directory to remove
    path: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_tracing();
    cli::run_to_exit(run(args)).await
}

async fn run(args: Args) -> anyhow::Result<i32> {
    let path = args.path.clone();
    tokio::task::spawn_blocking(move || fsops::remove_dir_if_exists(&path))
        .await?
        .with_context(|| format!("removing {:?}", args.path))?;
    Ok(0)
}
