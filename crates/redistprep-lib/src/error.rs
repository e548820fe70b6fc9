use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedistPrepError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid command-line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Mirror list error: {0}")]
    MirrorList(#[from] crate::download::EmptyMirrorList),

    #[error("Invalid mirror URL {url}: {reason}")]
    InvalidMirrorUrl { url: String, reason: String },

    #[error("Invalid expected digest {value}: {reason}")]
    InvalidDigest { value: String, reason: String },

    #[error("Download of {artifact} did not succeed: {outcome}")]
    DownloadFailed {
        artifact: String,
        outcome: crate::download::DownloadOutcome,
    },

    #[error("Runtime install failed for architecture {architecture}")]
    RuntimeInstall { architecture: String },

    #[error("Required external tool not found: {tool}")]
    ToolDiscovery { tool: String },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
