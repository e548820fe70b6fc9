use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Failed to execute signature verifier {program}: {source}")]
    Execution {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Signature verifier terminated by signal")]
    Terminated,
}

/// Verifies that a file carries a digital signature chaining to the expected
/// publisher identity.
///
/// The verdict is an integer code in the convention of platform signature
/// APIs: `0` means the signature checks out, anything else identifies the
/// failure. Callers only branch on zero; non-zero codes are logged verbatim.
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    async fn verify_signature(
        &self,
        path: &Path,
        expected_publisher: &str,
        expected_issuer: &str,
        check_root_of_trust: bool,
    ) -> Result<i32, SignatureError>;
}

/// Signature verification through an external command.
///
/// The tool is invoked as
/// `<tool> --publisher <name> --issuer <name> [--require-trusted-root] <path>`
/// and its exit code is the verdict.
pub struct CliSignatureVerifier {
    binary_path: PathBuf,
}

impl CliSignatureVerifier {
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempts to find `tool_name` in `PATH`.
    pub fn from_path(tool_name: &str) -> Option<Self> {
        which::which(tool_name).ok().map(Self::new)
    }
}

#[async_trait]
impl SignatureVerifier for CliSignatureVerifier {
    async fn verify_signature(
        &self,
        path: &Path,
        expected_publisher: &str,
        expected_issuer: &str,
        check_root_of_trust: bool,
    ) -> Result<i32, SignatureError> {
        let mut command = Command::new(&self.binary_path);
        command
            .arg("--publisher")
            .arg(expected_publisher)
            .arg("--issuer")
            .arg(expected_issuer);
        if check_root_of_trust {
            command.arg("--require-trusted-root");
        }
        command.arg(path);

        let status = command
            .status()
            .await
            .map_err(|source| SignatureError::Execution {
                program: self.binary_path.clone(),
                source,
            })?;

        status.code().ok_or(SignatureError::Terminated)
    }
}
