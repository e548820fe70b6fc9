use async_trait::async_trait;
use redistprep_lib::config::Config;
use redistprep_lib::download::{DownloadSurface, FetchError};
use redistprep_lib::presenter::{Presenter, RetryChoice};
use redistprep_lib::process::{LaunchError, ProcessRunner};
use redistprep_lib::verification::{
    MetadataError, MetadataReader, SignatureError, SignatureVerifier,
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use url::Url;

/// Behavior of one `download` call on a [`ScriptedSurface`].
#[derive(Clone, Copy, Debug)]
pub enum SurfaceAction {
    /// Write the payload to the registered local name and report success.
    Succeed,
    /// Report a transfer failure.
    FailTransfer,
    /// Report a user-initiated abort.
    Abort,
}

/// Download surface that follows a script instead of touching the network.
/// Successful downloads write `payload` to `download_dir/<local_name>` so
/// downstream validation sees a real file.
pub struct ScriptedSurface {
    pub download_dir: PathBuf,
    pub payload: Vec<u8>,
    pub script: VecDeque<SurfaceAction>,
    pub registered: Vec<(Url, String)>,
    pub clears: usize,
    pub downloads: usize,
    pub shows: usize,
    pub hides: usize,
    pending: Option<(Url, String)>,
}

impl ScriptedSurface {
    /// Surface whose every download succeeds.
    pub fn healthy(download_dir: PathBuf, payload: &[u8]) -> Self {
        Self::scripted(download_dir, payload, Vec::new())
    }

    /// Surface following `script`; calls beyond the script succeed.
    pub fn scripted(download_dir: PathBuf, payload: &[u8], script: Vec<SurfaceAction>) -> Self {
        Self {
            download_dir,
            payload: payload.to_vec(),
            script: script.into(),
            registered: Vec::new(),
            clears: 0,
            downloads: 0,
            shows: 0,
            hides: 0,
            pending: None,
        }
    }
}

#[async_trait]
impl DownloadSurface for ScriptedSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.pending = None;
    }

    fn add(
        &mut self,
        url: Url,
        local_name: &str,
        _expected_digest: Option<redistprep_lib::verification::ContentDigest>,
    ) {
        self.registered.push((url.clone(), local_name.to_string()));
        self.pending = Some((url, local_name.to_string()));
    }

    async fn download(&mut self) -> Result<(), FetchError> {
        self.downloads += 1;
        let (url, local_name) = self.pending.clone().ok_or(FetchError::NothingQueued)?;

        let action = self.script.pop_front().unwrap_or(SurfaceAction::Succeed);
        tracing::debug!(%url, local_name, ?action, "Scripted surface download");

        match action {
            SurfaceAction::Succeed => {
                std::fs::create_dir_all(&self.download_dir).expect("create download dir");
                std::fs::write(self.download_dir.join(&local_name), &self.payload)
                    .expect("write downloaded artifact");
                Ok(())
            }
            SurfaceAction::FailTransfer => Err(FetchError::Transfer {
                url: "https://mirror.invalid/artifact".to_string(),
                reason: "connection reset by peer".to_string(),
            }),
            SurfaceAction::Abort => Err(FetchError::AbortedByUser),
        }
    }

    fn show(&mut self) {
        self.shows += 1;
    }

    fn hide(&mut self) {
        self.hides += 1;
    }
}

/// Presenter that records every interaction and answers retry prompts from a
/// script (calls beyond the script cancel).
pub struct RecordingPresenter {
    pub choices: VecDeque<RetryChoice>,
    pub prompts: usize,
    pub progress_labels: Vec<String>,
    pub progress_hides: usize,
    pub blocking_errors: Vec<String>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::with_choices(Vec::new())
    }

    pub fn with_choices(choices: Vec<RetryChoice>) -> Self {
        Self {
            choices: choices.into(),
            prompts: 0,
            progress_labels: Vec::new(),
            progress_hides: 0,
            blocking_errors: Vec::new(),
        }
    }
}

impl Default for RecordingPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for RecordingPresenter {
    fn show_progress(&mut self, label: &str) {
        self.progress_labels.push(label.to_string());
    }

    fn hide_progress(&mut self) {
        self.progress_hides += 1;
    }

    fn show_blocking_error(&mut self, message: &str) {
        self.blocking_errors.push(message.to_string());
    }

    fn confirm_retry(&mut self, _artifact: &str) -> RetryChoice {
        self.prompts += 1;
        self.choices.pop_front().unwrap_or(RetryChoice::Cancel)
    }
}

/// What a [`StubRunner`] does when asked to run the installer.
#[derive(Clone, Copy, Debug)]
pub enum RunnerBehavior {
    Exit(i32),
    FailToLaunch,
}

/// Process runner that records invocations and reports a scripted result.
pub struct StubRunner {
    behavior: RunnerBehavior,
    pub invocations: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl StubRunner {
    pub fn exiting_with(code: i32) -> Self {
        Self {
            behavior: RunnerBehavior::Exit(code),
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_to_launch() -> Self {
        Self {
            behavior: RunnerBehavior::FailToLaunch,
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().expect("runner mutex").len()
    }
}

#[async_trait]
impl ProcessRunner for StubRunner {
    async fn run_and_wait(&self, program: &Path, args: &[&str]) -> Result<i32, LaunchError> {
        self.invocations.lock().expect("runner mutex").push((
            program.to_path_buf(),
            args.iter().map(|a| a.to_string()).collect(),
        ));
        match self.behavior {
            RunnerBehavior::Exit(code) => Ok(code),
            RunnerBehavior::FailToLaunch => Err(LaunchError::Spawn {
                program: program.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing executable"),
            }),
        }
    }
}

/// Signature verifier returning a fixed verdict code.
pub struct StubSignatureVerifier {
    verdict: i32,
    pub calls: Mutex<usize>,
}

impl StubSignatureVerifier {
    pub fn passing() -> Self {
        Self::with_verdict(0)
    }

    pub fn with_verdict(verdict: i32) -> Self {
        Self {
            verdict,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().expect("verifier mutex")
    }
}

#[async_trait]
impl SignatureVerifier for StubSignatureVerifier {
    async fn verify_signature(
        &self,
        _path: &Path,
        _expected_publisher: &str,
        _expected_issuer: &str,
        _check_root_of_trust: bool,
    ) -> Result<i32, SignatureError> {
        *self.calls.lock().expect("verifier mutex") += 1;
        Ok(self.verdict)
    }
}

/// Metadata reader returning a fixed product description.
pub struct StubMetadataReader {
    description: Option<String>,
}

impl StubMetadataReader {
    pub fn describing(description: &str) -> Self {
        Self {
            description: Some(description.to_string()),
        }
    }

    pub fn unreadable() -> Self {
        Self { description: None }
    }
}

#[async_trait]
impl MetadataReader for StubMetadataReader {
    async fn product_description(&self, path: &Path) -> Result<String, MetadataError> {
        self.description
            .clone()
            .ok_or_else(|| MetadataError::ReadFailed {
                path: path.to_path_buf(),
                reason: "no version resource".to_string(),
            })
    }
}

pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.download.max_retries = 1;
    config.download.output_dir = Some("/tmp/redistprep_test_output".into());
    config.runtime.target_architecture = Some("x64".to_string());
    config
}

pub fn setup_test_environment() -> eyre::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;

    let config = create_test_config();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    tracing::debug!(config_path = %config_path.display(), "Test environment ready");

    Ok(temp_dir)
}
