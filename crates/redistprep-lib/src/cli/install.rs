use crate::cli::params::InstallRuntimeParams;
use crate::download::HttpDownloadSurface;
use crate::error::RedistPrepError;
use crate::installer::{InstallContext, InstallMode, download_and_install};
use crate::presenter::ConsolePresenter;
use crate::process::TokioProcessRunner;
use crate::verification::{ArtifactValidator, CliMetadataReader, CliSignatureVerifier};
use tracing::info;

/// Tool names looked up in PATH when no explicit command is configured.
const DEFAULT_SIGNATURE_TOOL: &str = "authenticode-verify";
const DEFAULT_METADATA_TOOL: &str = "version-info";

pub async fn run_install_runtime(params: InstallRuntimeParams) -> Result<(), RedistPrepError> {
    let signature = match params.signature_tool {
        Some(path) => CliSignatureVerifier::new(path),
        None => CliSignatureVerifier::from_path(DEFAULT_SIGNATURE_TOOL).ok_or_else(|| {
            RedistPrepError::ToolDiscovery {
                tool: DEFAULT_SIGNATURE_TOOL.to_string(),
            }
        })?,
    };
    let metadata = match params.metadata_tool {
        Some(path) => CliMetadataReader::new(path),
        None => CliMetadataReader::from_path(DEFAULT_METADATA_TOOL).ok_or_else(|| {
            RedistPrepError::ToolDiscovery {
                tool: DEFAULT_METADATA_TOOL.to_string(),
            }
        })?,
    };

    let validator = ArtifactValidator::new(&signature, &metadata, params.policy.clone());
    let runner = TokioProcessRunner;
    let mut surface = HttpDownloadSurface::new(params.request.download_dir.clone());
    let mut presenter = ConsolePresenter::new(params.interactive);
    let mut ctx = InstallContext::new(
        params.request.architecture.parse().ok(),
        InstallMode::default(),
    );

    let outcome = download_and_install(
        &params.request,
        &mut surface,
        &mut presenter,
        &validator,
        &runner,
        &mut ctx,
    )
    .await;

    if outcome.succeeded() {
        if ctx.restart_required {
            info!("Runtime installed; a restart is required before it is usable");
        } else {
            info!("Runtime installed successfully");
        }
        Ok(())
    } else {
        Err(RedistPrepError::RuntimeInstall {
            architecture: params.request.architecture.clone(),
        })
    }
}
