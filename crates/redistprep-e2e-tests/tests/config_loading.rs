use redistprep_e2e_tests::{create_test_config, setup_test_environment};
use redistprep_lib::cli::{Command, ResolvedCommand, resolve_command};
use redistprep_lib::config::load_config;

#[test]
fn config_file_round_trips_through_the_loader() {
    init_tracing();

    let temp_dir = setup_test_environment().expect("Failed to setup test environment");
    let config_path = temp_dir.path().join("config.json");

    let loaded = load_config(config_path.to_str().unwrap()).expect("Config should load");
    let expected = create_test_config();

    assert_eq!(loaded.download.max_retries, expected.download.max_retries);
    assert_eq!(loaded.download.output_dir, expected.download.output_dir);
    assert_eq!(
        loaded.runtime.target_architecture,
        expected.runtime.target_architecture
    );
    assert_eq!(
        loaded.verification.policy.publisher,
        expected.verification.policy.publisher
    );
}

#[test]
fn install_runtime_command_falls_back_to_config_values() {
    init_tracing();

    let temp_dir = setup_test_environment().expect("Failed to setup test environment");
    let config_path = temp_dir.path().join("config.json");

    let command = Command::InstallRuntime {
        config_path: Some(config_path.to_str().unwrap().to_string()),
        target_arch: None,
        output_dir: None,
        max_retries: None,
        signature_tool: None,
        metadata_tool: None,
        non_interactive: true,
    };

    let resolved = resolve_command(command).expect("Command should resolve");
    let ResolvedCommand::InstallRuntime(params) = resolved else {
        panic!("Resolved command type mismatch");
    };

    assert_eq!(params.request.architecture, "x64");
    assert_eq!(params.request.max_retries, 1);
    assert_eq!(
        params.request.download_dir,
        std::path::PathBuf::from("/tmp/redistprep_test_output")
    );
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("redistprep=debug,redistprep_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
