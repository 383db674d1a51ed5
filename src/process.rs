//! Child-process launching with environment and directory overrides.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::info;

use crate::error::Result;

/// What to launch and under which overrides.
#[derive(Debug, Clone)]
pub struct SpawnSpec {
    /// Program to run.
    pub program: OsString,
    /// Arguments passed to the program.
    pub args: Vec<OsString>,
    /// Extra environment entries layered over the inherited environment.
    pub env: Vec<(String, String)>,
    /// Working directory override.
    pub cwd: Option<PathBuf>,
}

impl SpawnSpec {
    /// Spec for running `program` with no arguments or overrides.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }
}

/// Spawn the child with inherited stdio, wait for it, and return its exit
/// code unchanged.
pub async fn run(spec: &SpawnSpec) -> Result<i32> {
    let mut command = Command::new(&spec.program);
    command.args(&spec.args);

    for (key, value) in &spec.env {
        info!("Set env variable {}={}", key, value);
        command.env(key, value);
    }
    if let Some(cwd) = &spec.cwd {
        info!("Set cwd={:?}", cwd);
        command.current_dir(cwd);
    }

    let status = command.status().await?;
    Ok(exit_code(&status))
}

/// Exit code of a finished child. Signal terminations map to
/// `128 + signal`, the value a POSIX shell reports.
pub fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Parse a `KEY=VALUE` environment override; the value starts after the
/// first `=`. Used as a clap value parser.
pub fn parse_env_pair(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}
