mod arch;
mod context;
mod mode;
mod runtime;

pub use arch::{Architecture, UnknownArchitecture, redist_url};
pub use context::InstallContext;
pub use mode::InstallMode;
pub use runtime::{
    EXIT_SUCCESS, EXIT_SUCCESS_REBOOT_REQUIRED, InstallOutcome, ProgressLabels,
    REDIST_INSTALL_ARGS, RuntimeInstallRequest, download_and_install,
};
