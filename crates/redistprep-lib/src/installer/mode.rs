use crate::error::RedistPrepError;
use std::path::{Path, PathBuf};

/// Named install variant selected by the user.
///
/// Side-by-side installs carry a version-specific identity so multiple
/// versions coexist; portable installs target a self-contained, relocatable
/// directory and register no per-machine identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstallMode {
    #[default]
    Normal,
    SideBySide,
    Portable,
}

impl InstallMode {
    /// Resolves the `--portable` / `--side-by-side` flag pair. Selecting both
    /// is an argument error.
    pub fn from_flags(portable: bool, side_by_side: bool) -> Result<Self, RedistPrepError> {
        match (portable, side_by_side) {
            (true, true) => Err(RedistPrepError::CliArgumentValidation {
                details: "--portable and --side-by-side are mutually exclusive.".to_string(),
            }),
            (true, false) => Ok(InstallMode::Portable),
            (false, true) => Ok(InstallMode::SideBySide),
            (false, false) => Ok(InstallMode::Normal),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMode::Normal => "normal",
            InstallMode::SideBySide => "side-by-side",
            InstallMode::Portable => "portable",
        }
    }

    /// Application identity under this mode. Side-by-side appends the version
    /// so each installed version is distinct.
    pub fn app_identity(&self, base_name: &str, version: &str) -> String {
        match self {
            InstallMode::SideBySide => format!("{base_name}-{version}"),
            InstallMode::Normal | InstallMode::Portable => base_name.to_string(),
        }
    }

    /// Install directory under `root`. For portable installs `root` is the
    /// relocatable medium chosen by the user.
    pub fn install_dir(&self, root: &Path, base_name: &str, version: &str) -> PathBuf {
        root.join(self.app_identity(base_name, version))
    }

    /// Whether this mode registers a per-machine/per-user app identity.
    pub fn registers_app_identity(&self) -> bool {
        !matches!(self, InstallMode::Portable)
    }
}

impl std::fmt::Display for InstallMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_resolution() {
        assert_eq!(
            InstallMode::from_flags(false, false).unwrap(),
            InstallMode::Normal
        );
        assert_eq!(
            InstallMode::from_flags(true, false).unwrap(),
            InstallMode::Portable
        );
        assert_eq!(
            InstallMode::from_flags(false, true).unwrap(),
            InstallMode::SideBySide
        );
        assert!(InstallMode::from_flags(true, true).is_err());
    }

    #[test]
    fn side_by_side_appends_version_to_identity() {
        assert_eq!(
            InstallMode::SideBySide.app_identity("Acme", "2.1.0"),
            "Acme-2.1.0"
        );
        assert_eq!(InstallMode::Normal.app_identity("Acme", "2.1.0"), "Acme");
        assert_eq!(InstallMode::Portable.app_identity("Acme", "2.1.0"), "Acme");
    }

    #[test]
    fn install_dir_follows_identity() {
        let root = Path::new("/opt");
        assert_eq!(
            InstallMode::Normal.install_dir(root, "Acme", "2.1.0"),
            PathBuf::from("/opt/Acme")
        );
        assert_eq!(
            InstallMode::SideBySide.install_dir(root, "Acme", "2.1.0"),
            PathBuf::from("/opt/Acme-2.1.0")
        );
    }

    #[test]
    fn portable_registers_no_identity() {
        assert!(InstallMode::Normal.registers_app_identity());
        assert!(InstallMode::SideBySide.registers_app_identity());
        assert!(!InstallMode::Portable.registers_app_identity());
    }
}
