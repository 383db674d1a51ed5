//! Launch a child process with environment and working directory overrides.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use abp_prep::cli;
use abp_prep::process::{self, SpawnSpec};

/// Run COMMAND with optional overrides, forwarding its exit code.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Environment override for the child, repeatable
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = process::parse_env_pair)]
    env: Vec<(String, String)>,

    /// Working directory for the child
    #[arg(long, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Child command and its arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<OsString>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_tracing();
    cli::run_to_exit(run(args)).await
}

async fn run(args: Args) -> anyhow::Result<i32> {
    let Args { env, cwd, command } = args;

    let mut parts = command.into_iter();
    let Some(program) = parts.next() else {
        anyhow::bail!("missing command");
    };

    let mut spec = SpawnSpec::new(program);
    spec.args = parts.collect();
    spec.env = env;
    spec.cwd = cwd;

    let code = process::run(&spec).await?;
    Ok(code)
}
