use crate::verification::ValidationPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub download: DownloadConfig,
    pub runtime: RuntimeConfig,
    pub verification: VerificationConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DownloadConfig {
    /// Directory downloaded artifacts are stored in. Falls back to the
    /// system temporary directory when unset.
    pub output_dir: Option<PathBuf>,
    /// Extra full passes over the mirror list the user may approve.
    pub max_retries: u32,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            max_retries: 2,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct RuntimeConfig {
    /// Architecture the runtime redistributable is installed for.
    pub target_architecture: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct VerificationConfig {
    pub policy: ValidationPolicy,
    /// External signature verification command; discovered in PATH when
    /// unset.
    pub signature_tool: Option<PathBuf>,
    /// External version metadata command; discovered in PATH when unset.
    pub metadata_tool: Option<PathBuf>,
}
