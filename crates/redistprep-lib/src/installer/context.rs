use super::arch::Architecture;
use super::mode::InstallMode;

/// Mutable state of one setup flow, owned by the command layer and passed
/// explicitly into the protocols that read or write it.
///
/// `restart_required` starts false, is set at most once by the runtime
/// install step, and is never cleared.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstallContext {
    pub architecture: Option<Architecture>,
    pub install_mode: InstallMode,
    pub restart_required: bool,
}

impl InstallContext {
    pub fn new(architecture: Option<Architecture>, install_mode: InstallMode) -> Self {
        Self {
            architecture,
            install_mode,
            restart_required: false,
        }
    }
}
