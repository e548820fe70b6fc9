use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to execute metadata reader {program}: {source}")]
    Execution {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Metadata reader failed for {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Metadata reader produced non-UTF-8 output for {path}")]
    InvalidOutput { path: PathBuf },
}

/// Reads the human-readable product description field from a file's embedded
/// version metadata.
///
/// The original host API required a length query followed by a fetch into a
/// caller-sized buffer; here the reader owns the buffer and returns the
/// string in one call.
#[async_trait]
pub trait MetadataReader: Send + Sync {
    async fn product_description(&self, path: &Path) -> Result<String, MetadataError>;
}

/// Metadata inspection through an external command that prints the product
/// description of `<path>` on its first stdout line and exits non-zero when
/// the field is absent or unreadable.
pub struct CliMetadataReader {
    binary_path: PathBuf,
}

impl CliMetadataReader {
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempts to find `tool_name` in `PATH`.
    pub fn from_path(tool_name: &str) -> Option<Self> {
        which::which(tool_name).ok().map(Self::new)
    }
}

#[async_trait]
impl MetadataReader for CliMetadataReader {
    async fn product_description(&self, path: &Path) -> Result<String, MetadataError> {
        let output = Command::new(&self.binary_path)
            .arg(path)
            .output()
            .await
            .map_err(|source| MetadataError::Execution {
                program: self.binary_path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(MetadataError::ReadFailed {
                path: path.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| MetadataError::InvalidOutput {
            path: path.to_path_buf(),
        })?;

        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_returns_none_for_nonexistent_binary() {
        assert!(CliMetadataReader::from_path("nonexistent-version-info-xyz").is_none());
    }

    #[tokio::test]
    async fn read_with_invalid_binary_path_reports_execution_error() {
        let reader = CliMetadataReader::new(PathBuf::from("/nonexistent/path/to/version-info"));

        let result = reader.product_description(Path::new("artifact.exe")).await;

        assert!(matches!(result, Err(MetadataError::Execution { .. })));
    }
}
