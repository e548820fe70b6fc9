use redistprep_e2e_tests::{
    RecordingPresenter, ScriptedSurface, StubMetadataReader, StubRunner, StubSignatureVerifier,
    SurfaceAction,
};
use redistprep_lib::installer::{
    InstallContext, InstallOutcome, ProgressLabels, REDIST_INSTALL_ARGS, RuntimeInstallRequest,
    download_and_install,
};
use redistprep_lib::verification::{ArtifactValidator, ValidationPolicy};
use std::path::PathBuf;

const DESCRIPTION: &str = "Microsoft Visual C++ 2015-2022 Redistributable (x64) - 14.40.33810";

fn request(architecture: &str, download_dir: PathBuf) -> RuntimeInstallRequest {
    RuntimeInstallRequest {
        architecture: architecture.to_string(),
        labels: ProgressLabels::default(),
        max_retries: 0,
        download_dir,
    }
}

#[tokio::test]
async fn successful_install_reports_success_without_restart() {
    init_tracing();
    let temp_dir = tempfile::tempdir().expect("tempdir");

    let mut surface = ScriptedSurface::healthy(temp_dir.path().to_path_buf(), b"installer-bytes");
    let mut presenter = RecordingPresenter::new();
    let signature = StubSignatureVerifier::passing();
    let metadata = StubMetadataReader::describing(DESCRIPTION);
    let validator = ArtifactValidator::new(&signature, &metadata, ValidationPolicy::default());
    let runner = StubRunner::exiting_with(0);
    let mut ctx = InstallContext::default();

    let outcome = download_and_install(
        &request("x64", temp_dir.path().to_path_buf()),
        &mut surface,
        &mut presenter,
        &validator,
        &runner,
        &mut ctx,
    )
    .await;

    assert_eq!(outcome, InstallOutcome::Success);
    assert!(!ctx.restart_required);
    assert!(presenter.blocking_errors.is_empty());

    // The download surface was shown and hidden exactly once.
    assert_eq!(surface.shows, 1);
    assert_eq!(surface.hides, 1);

    // The installer was launched from the download directory with the fixed
    // silent/no-reboot flags.
    let invocations = runner.invocations.lock().expect("runner mutex");
    assert_eq!(invocations.len(), 1);
    let (program, args) = &invocations[0];
    assert_eq!(*program, temp_dir.path().join("vc_redist.x64.exe"));
    assert_eq!(args, &REDIST_INSTALL_ARGS.map(String::from).to_vec());
}

#[tokio::test]
async fn exit_code_3010_sets_the_restart_flag() {
    init_tracing();
    let temp_dir = tempfile::tempdir().expect("tempdir");

    let mut surface = ScriptedSurface::healthy(temp_dir.path().to_path_buf(), b"installer-bytes");
    let mut presenter = RecordingPresenter::new();
    let signature = StubSignatureVerifier::passing();
    let metadata = StubMetadataReader::describing(DESCRIPTION);
    let validator = ArtifactValidator::new(&signature, &metadata, ValidationPolicy::default());
    let runner = StubRunner::exiting_with(3010);
    let mut ctx = InstallContext::default();

    let outcome = download_and_install(
        &request("x64", temp_dir.path().to_path_buf()),
        &mut surface,
        &mut presenter,
        &validator,
        &runner,
        &mut ctx,
    )
    .await;

    assert_eq!(outcome, InstallOutcome::SuccessNeedsRestart);
    assert!(outcome.succeeded());
    assert!(ctx.restart_required);
    assert!(presenter.blocking_errors.is_empty());
}

#[tokio::test]
async fn unknown_exit_code_fails_without_a_blocking_error() {
    init_tracing();
    let temp_dir = tempfile::tempdir().expect("tempdir");

    let mut surface = ScriptedSurface::healthy(temp_dir.path().to_path_buf(), b"installer-bytes");
    let mut presenter = RecordingPresenter::new();
    let signature = StubSignatureVerifier::passing();
    let metadata = StubMetadataReader::describing(DESCRIPTION);
    let validator = ArtifactValidator::new(&signature, &metadata, ValidationPolicy::default());
    let runner = StubRunner::exiting_with(7);
    let mut ctx = InstallContext::default();

    let outcome = download_and_install(
        &request("x64", temp_dir.path().to_path_buf()),
        &mut surface,
        &mut presenter,
        &validator,
        &runner,
        &mut ctx,
    )
    .await;

    assert_eq!(outcome, InstallOutcome::Failure);
    assert!(!ctx.restart_required);
    // An unknown exit code is logged, never raised as a blocking dialog.
    assert!(presenter.blocking_errors.is_empty());
}

#[tokio::test]
async fn launch_failure_raises_exactly_one_blocking_error() {
    init_tracing();
    let temp_dir = tempfile::tempdir().expect("tempdir");

    let mut surface = ScriptedSurface::healthy(temp_dir.path().to_path_buf(), b"installer-bytes");
    let mut presenter = RecordingPresenter::new();
    let signature = StubSignatureVerifier::passing();
    let metadata = StubMetadataReader::describing(DESCRIPTION);
    let validator = ArtifactValidator::new(&signature, &metadata, ValidationPolicy::default());
    let runner = StubRunner::failing_to_launch();
    let mut ctx = InstallContext::default();

    let outcome = download_and_install(
        &request("x64", temp_dir.path().to_path_buf()),
        &mut surface,
        &mut presenter,
        &validator,
        &runner,
        &mut ctx,
    )
    .await;

    assert_eq!(outcome, InstallOutcome::Failure);
    assert!(!ctx.restart_required);
    assert_eq!(presenter.blocking_errors.len(), 1);
}

#[tokio::test]
async fn validation_failure_stops_before_launch() {
    init_tracing();
    let temp_dir = tempfile::tempdir().expect("tempdir");

    let mut surface = ScriptedSurface::healthy(temp_dir.path().to_path_buf(), b"installer-bytes");
    let mut presenter = RecordingPresenter::new();
    let signature = StubSignatureVerifier::with_verdict(1);
    let metadata = StubMetadataReader::describing(DESCRIPTION);
    let validator = ArtifactValidator::new(&signature, &metadata, ValidationPolicy::default());
    let runner = StubRunner::exiting_with(0);
    let mut ctx = InstallContext::default();

    let outcome = download_and_install(
        &request("x64", temp_dir.path().to_path_buf()),
        &mut surface,
        &mut presenter,
        &validator,
        &runner,
        &mut ctx,
    )
    .await;

    assert_eq!(outcome, InstallOutcome::Failure);
    assert_eq!(signature.call_count(), 1);
    assert_eq!(runner.invocation_count(), 0);
    assert!(presenter.blocking_errors.is_empty());
}

#[tokio::test]
async fn wrong_product_description_fails_validation() {
    init_tracing();
    let temp_dir = tempfile::tempdir().expect("tempdir");

    let mut surface = ScriptedSurface::healthy(temp_dir.path().to_path_buf(), b"installer-bytes");
    let mut presenter = RecordingPresenter::new();
    let signature = StubSignatureVerifier::passing();
    let metadata = StubMetadataReader::describing("Contoso Helper Runtime");
    let validator = ArtifactValidator::new(&signature, &metadata, ValidationPolicy::default());
    let runner = StubRunner::exiting_with(0);
    let mut ctx = InstallContext::default();

    let outcome = download_and_install(
        &request("x64", temp_dir.path().to_path_buf()),
        &mut surface,
        &mut presenter,
        &validator,
        &runner,
        &mut ctx,
    )
    .await;

    assert_eq!(outcome, InstallOutcome::Failure);
    assert_eq!(runner.invocation_count(), 0);
}

#[tokio::test]
async fn unsupported_architecture_fails_before_any_download() {
    init_tracing();
    let temp_dir = tempfile::tempdir().expect("tempdir");

    let mut surface = ScriptedSurface::healthy(temp_dir.path().to_path_buf(), b"installer-bytes");
    let mut presenter = RecordingPresenter::new();
    let signature = StubSignatureVerifier::passing();
    let metadata = StubMetadataReader::describing(DESCRIPTION);
    let validator = ArtifactValidator::new(&signature, &metadata, ValidationPolicy::default());
    let runner = StubRunner::exiting_with(0);
    let mut ctx = InstallContext::default();

    let outcome = download_and_install(
        &request("mips", temp_dir.path().to_path_buf()),
        &mut surface,
        &mut presenter,
        &validator,
        &runner,
        &mut ctx,
    )
    .await;

    assert_eq!(outcome, InstallOutcome::Failure);
    // Nothing is shown to the user for an unsupported architecture.
    assert_eq!(surface.shows, 0);
    assert_eq!(surface.downloads, 0);
    assert!(presenter.progress_labels.is_empty());
    assert!(presenter.blocking_errors.is_empty());
    assert_eq!(runner.invocation_count(), 0);
}

#[tokio::test]
async fn failed_download_is_terminal_for_the_protocol() {
    init_tracing();
    let temp_dir = tempfile::tempdir().expect("tempdir");

    // The runtime download has a single mirror and max_retries = 0, so one
    // transfer failure exhausts the download step.
    let mut surface = ScriptedSurface::scripted(
        temp_dir.path().to_path_buf(),
        b"installer-bytes",
        vec![SurfaceAction::FailTransfer],
    );
    let mut presenter = RecordingPresenter::new();
    let signature = StubSignatureVerifier::passing();
    let metadata = StubMetadataReader::describing(DESCRIPTION);
    let validator = ArtifactValidator::new(&signature, &metadata, ValidationPolicy::default());
    let runner = StubRunner::exiting_with(0);
    let mut ctx = InstallContext::default();

    let outcome = download_and_install(
        &request("x64", temp_dir.path().to_path_buf()),
        &mut surface,
        &mut presenter,
        &validator,
        &runner,
        &mut ctx,
    )
    .await;

    assert_eq!(outcome, InstallOutcome::Failure);
    // The surface is hidden even on the failure path.
    assert_eq!(surface.hides, 1);
    // Validation never ran: the downloaded file does not exist.
    assert_eq!(signature.call_count(), 0);
    assert_eq!(runner.invocation_count(), 0);
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("redistprep=debug,redistprep_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
