use super::arch::redist_url;
use super::context::InstallContext;
use crate::download::{
    DownloadOutcome, DownloadRequest, DownloadSurface, MirrorList, download_with_retry,
};
use crate::presenter::Presenter;
use crate::process::ProcessRunner;
use crate::verification::ArtifactValidator;
use std::path::PathBuf;
use tracing::{info, warn};
use url::Url;

/// Exit code a runtime installer reports on plain success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code a runtime installer reports when the install succeeded but the
/// machine must reboot before the runtime is usable.
pub const EXIT_SUCCESS_REBOOT_REQUIRED: i32 = 3010;

/// Flags requesting a silent, unattended install without an automatic reboot.
pub const REDIST_INSTALL_ARGS: [&str; 3] = ["/install", "/quiet", "/norestart"];

/// Terminal result of one runtime install protocol run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    Success,
    SuccessNeedsRestart,
    Failure,
}

impl InstallOutcome {
    pub fn from_exit_code(code: i32) -> Self {
        match code {
            EXIT_SUCCESS => InstallOutcome::Success,
            EXIT_SUCCESS_REBOOT_REQUIRED => InstallOutcome::SuccessNeedsRestart,
            _ => InstallOutcome::Failure,
        }
    }

    /// True for both plain and deferred-restart success.
    pub fn succeeded(&self) -> bool {
        !matches!(self, InstallOutcome::Failure)
    }
}

/// Progress text shown while the protocol verifies, launches and waits for
/// the runtime installer.
#[derive(Clone, Debug)]
pub struct ProgressLabels {
    pub verifying: String,
    pub installing: String,
    pub waiting: String,
}

impl Default for ProgressLabels {
    fn default() -> Self {
        Self {
            verifying: "Verifying runtime installer...".to_string(),
            installing: "Installing runtime...".to_string(),
            waiting: "Waiting for the runtime installer to finish...".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RuntimeInstallRequest {
    pub architecture: String,
    pub labels: ProgressLabels,
    pub max_retries: u32,
    pub download_dir: PathBuf,
}

/// Downloads, validates and chain-installs the runtime redistributable for
/// the requested architecture.
///
/// Each step gates the next. Every failure path logs a diagnostic; the only
/// blocking user-facing error is a process that could not be launched at
/// all, since that points at an environment fault the user must know about.
/// Other failure causes are left to the caller's own flow.
pub async fn download_and_install(
    request: &RuntimeInstallRequest,
    surface: &mut (dyn DownloadSurface + Send),
    presenter: &mut dyn Presenter,
    validator: &ArtifactValidator<'_>,
    runner: &dyn ProcessRunner,
    ctx: &mut InstallContext,
) -> InstallOutcome {
    let Some(url_str) = redist_url(&request.architecture) else {
        warn!(
            architecture = %request.architecture,
            "No runtime redistributable URL for architecture"
        );
        return InstallOutcome::Failure;
    };
    let Ok(url) = Url::parse(url_str) else {
        warn!(url = url_str, "Malformed runtime redistributable URL");
        return InstallOutcome::Failure;
    };

    let local_name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("runtime_redist.exe")
        .to_string();
    let local_path = request.download_dir.join(&local_name);

    // The upstream artifact is not pinned by a checksum (it may change at any
    // time), so the download carries no expected digest and there is no
    // second retry layer above this one.
    let download_request = DownloadRequest {
        mirrors: MirrorList::single(url),
        local_name: local_name.clone(),
        expected_digest: None,
        max_retries: request.max_retries,
    };

    surface.show();
    let outcome = download_with_retry(surface, presenter, &download_request).await;
    surface.hide();

    if outcome != DownloadOutcome::Success {
        warn!(
            architecture = %request.architecture,
            %outcome,
            "Runtime redistributable download did not succeed"
        );
        return InstallOutcome::Failure;
    }

    presenter.show_progress(&request.labels.verifying);
    let valid = validator.validate(&local_path).await;
    if !valid {
        presenter.hide_progress();
        warn!(
            path = %local_path.display(),
            "Runtime redistributable failed validation"
        );
        return InstallOutcome::Failure;
    }

    presenter.show_progress(&request.labels.installing);
    info!(
        path = %local_path.display(),
        args = ?REDIST_INSTALL_ARGS,
        "Launching runtime installer"
    );
    presenter.show_progress(&request.labels.waiting);

    let exit_code = match runner.run_and_wait(&local_path, &REDIST_INSTALL_ARGS).await {
        Ok(code) => code,
        Err(err) => {
            presenter.hide_progress();
            warn!(path = %local_path.display(), error = %err, "Runtime installer failed to launch");
            presenter.show_blocking_error(&format!(
                "The runtime installer could not be started: {err}"
            ));
            return InstallOutcome::Failure;
        }
    };
    presenter.hide_progress();

    match InstallOutcome::from_exit_code(exit_code) {
        InstallOutcome::Success => {
            info!(exit_code, "Runtime installed");
            InstallOutcome::Success
        }
        InstallOutcome::SuccessNeedsRestart => {
            info!(exit_code, "Runtime installed, restart required");
            ctx.restart_required = true;
            InstallOutcome::SuccessNeedsRestart
        }
        InstallOutcome::Failure => {
            warn!(exit_code, "Runtime installer reported failure");
            InstallOutcome::Failure
        }
    }
}
