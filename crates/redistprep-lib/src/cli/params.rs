use crate::download::DownloadRequest;
use crate::installer::{Architecture, InstallMode, RuntimeInstallRequest};
use crate::verification::ValidationPolicy;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct FetchParams {
    pub request: DownloadRequest,
    pub output_dir: PathBuf,
    pub interactive: bool,
}

#[derive(Clone, Debug)]
pub struct InstallRuntimeParams {
    pub request: RuntimeInstallRequest,
    pub policy: ValidationPolicy,
    pub signature_tool: Option<PathBuf>,
    pub metadata_tool: Option<PathBuf>,
    pub interactive: bool,
}

#[derive(Clone, Debug)]
pub struct PlanParams {
    pub architecture: Architecture,
    pub install_mode: InstallMode,
    pub app_name: String,
    pub app_version: String,
    pub install_root: PathBuf,
}
