use redistprep_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_fetch, run_install_runtime, run_plan};
use redistprep_lib::error::RedistPrepError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), RedistPrepError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Fetch(params) => run_fetch(params).await?,
        ResolvedCommand::InstallRuntime(params) => run_install_runtime(params).await?,
        ResolvedCommand::Plan(params) => run_plan(params).await?,
    }

    Ok(())
}
