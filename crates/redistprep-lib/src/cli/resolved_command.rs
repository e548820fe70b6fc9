use crate::cli::args::Command;
use crate::cli::params::{FetchParams, InstallRuntimeParams, PlanParams};
use crate::config::{Config, load_config};
use crate::download::{DownloadRequest, MirrorList};
use crate::error::RedistPrepError;
use crate::installer::{InstallMode, ProgressLabels, RuntimeInstallRequest};
use crate::verification::ContentDigest;
use std::path::PathBuf;
use url::Url;

#[derive(Clone, Debug)]
pub enum ResolvedCommand {
    Fetch(FetchParams),
    InstallRuntime(InstallRuntimeParams),
    Plan(PlanParams),
}

fn load_optional_config(config_path: Option<&str>) -> Result<Config, RedistPrepError> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

fn parse_mirrors(urls: &[String]) -> Result<MirrorList, RedistPrepError> {
    let mut mirrors = Vec::with_capacity(urls.len());
    for url in urls {
        mirrors.push(
            Url::parse(url).map_err(|e| RedistPrepError::InvalidMirrorUrl {
                url: url.clone(),
                reason: e.to_string(),
            })?,
        );
    }
    MirrorList::new(mirrors).map_err(Into::into)
}

fn parse_digest(value: &str) -> Result<ContentDigest, RedistPrepError> {
    let Some((algorithm, hex_value)) = value.split_once(':') else {
        return Err(RedistPrepError::InvalidDigest {
            value: value.to_string(),
            reason: "expected the form <algorithm>:<hex>, e.g. sha256:9f86d0...".to_string(),
        });
    };
    ContentDigest::from_hex(algorithm, hex_value).map_err(|e| RedistPrepError::InvalidDigest {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn resolve_output_dir(flag: Option<String>, config: &Config) -> PathBuf {
    flag.map(PathBuf::from)
        .or_else(|| config.download.output_dir.clone())
        .unwrap_or_else(std::env::temp_dir)
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, RedistPrepError> {
    match command {
        Command::Fetch {
            config_path,
            urls,
            name,
            digest,
            output_dir,
            max_retries,
            non_interactive,
        } => {
            if name.trim().is_empty() {
                return Err(RedistPrepError::CliArgumentValidation {
                    details: "Artifact name must not be empty.".to_string(),
                });
            }

            let app_config = load_optional_config(config_path.as_deref())?;
            let mirrors = parse_mirrors(&urls)?;
            let expected_digest = digest.as_deref().map(parse_digest).transpose()?;

            Ok(ResolvedCommand::Fetch(FetchParams {
                request: DownloadRequest {
                    mirrors,
                    local_name: name,
                    expected_digest,
                    max_retries: max_retries.unwrap_or(app_config.download.max_retries),
                },
                output_dir: resolve_output_dir(output_dir, &app_config),
                interactive: !non_interactive,
            }))
        }
        Command::InstallRuntime {
            config_path,
            target_arch,
            output_dir,
            max_retries,
            signature_tool,
            metadata_tool,
            non_interactive,
        } => {
            let app_config = load_optional_config(config_path.as_deref())?;

            let architecture = target_arch
                .or_else(|| app_config.runtime.target_architecture.clone())
                .ok_or_else(|| RedistPrepError::CliArgumentValidation {
                    details: "No target architecture provided. Configure runtime.target_architecture or pass --target-arch.".to_string(),
                })?;

            Ok(ResolvedCommand::InstallRuntime(InstallRuntimeParams {
                request: RuntimeInstallRequest {
                    architecture,
                    labels: ProgressLabels::default(),
                    max_retries: max_retries.unwrap_or(app_config.download.max_retries),
                    download_dir: resolve_output_dir(output_dir, &app_config),
                },
                policy: app_config.verification.policy.clone(),
                signature_tool: signature_tool
                    .map(PathBuf::from)
                    .or_else(|| app_config.verification.signature_tool.clone()),
                metadata_tool: metadata_tool
                    .map(PathBuf::from)
                    .or_else(|| app_config.verification.metadata_tool.clone()),
                interactive: !non_interactive,
            }))
        }
        Command::Plan {
            target_arch,
            portable,
            side_by_side,
            app_name,
            app_version,
            install_root,
        } => {
            let architecture = target_arch.parse().map_err(|e| {
                RedistPrepError::CliArgumentValidation {
                    details: format!("{e}. Supported values: x86, x64, arm64."),
                }
            })?;
            let install_mode = InstallMode::from_flags(portable, side_by_side)?;

            if app_name.trim().is_empty() {
                return Err(RedistPrepError::CliArgumentValidation {
                    details: "Application name must not be empty.".to_string(),
                });
            }

            Ok(ResolvedCommand::Plan(PlanParams {
                architecture,
                install_mode,
                app_name,
                app_version,
                install_root: PathBuf::from(install_root),
            }))
        }
    }
}
