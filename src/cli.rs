//! Shared binary scaffolding: logging setup and the top-level run loop.

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::layout::Checkout;

/// Initialise logging; `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    // Keep the first subscriber if one is already set (tests).
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Resolve the checkout layout from an optional `--root` override.
pub fn checkout_from(root: Option<PathBuf>) -> io::Result<Checkout> {
    match root {
        Some(root) => Ok(Checkout::new(root)),
        None => Checkout::from_cwd(),
    }
}

/// Drive `fut` to completion, racing it against Ctrl-C.
///
/// Returns the future's exit code on success, 1 on error, and 1 after
/// printing "interrupted" when the signal wins.
pub async fn run_to_exit<F>(fut: F) -> ExitCode
where
    F: Future<Output = anyhow::Result<i32>>,
{
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            eprintln!("interrupted");
            ExitCode::FAILURE
        }
        result = fut => match result {
            Ok(code) => to_exit_code(code),
            Err(err) => {
                error!("{err:#}");
                ExitCode::FAILURE
            }
        }
    }
}

fn to_exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
