use crate::cli::params::PlanParams;
use crate::error::RedistPrepError;
use crate::installer::redist_url;

pub async fn run_plan(params: PlanParams) -> Result<(), RedistPrepError> {
    let identity = params
        .install_mode
        .app_identity(&params.app_name, &params.app_version);
    let install_dir = params.install_mode.install_dir(
        &params.install_root,
        &params.app_name,
        &params.app_version,
    );
    // The architecture was already validated, so the table lookup always hits.
    let runtime_url = redist_url(params.architecture.as_str()).unwrap_or("<none>");

    println!("Install mode:       {}", params.install_mode);
    println!("Architecture:       {}", params.architecture);
    println!("App identity:       {identity}");
    println!("Install directory:  {}", install_dir.display());
    println!(
        "Registers identity: {}",
        if params.install_mode.registers_app_identity() {
            "yes"
        } else {
            "no"
        }
    );
    println!("Runtime installer:  {runtime_url}");

    Ok(())
}
