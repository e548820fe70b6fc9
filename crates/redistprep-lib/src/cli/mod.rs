mod args;
mod fetch;
mod install;
mod params;
mod plan;
mod resolved_command;

pub use args::{Args, Command, parse_args};
pub use fetch::run_fetch;
pub use install::run_install_runtime;
pub use params::{FetchParams, InstallRuntimeParams, PlanParams};
pub use plan::run_plan;
pub use resolved_command::{ResolvedCommand, resolve_command};
