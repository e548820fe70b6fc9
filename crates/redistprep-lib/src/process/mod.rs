use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
}

/// Runs an executable to completion and reports its exit code.
///
/// The call blocks (in the async sense) until the process exits; no timeout
/// is imposed here. A process killed by a signal reports exit code `-1`.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run_and_wait(&self, program: &Path, args: &[&str]) -> Result<i32, LaunchError>;
}

/// `ProcessRunner` backed by `tokio::process`.
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run_and_wait(&self, program: &Path, args: &[&str]) -> Result<i32, LaunchError> {
        debug!(program = %program.display(), ?args, "Launching process");

        let status = tokio::process::Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|source| LaunchError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        Ok(status.code().unwrap_or(-1))
    }
}
