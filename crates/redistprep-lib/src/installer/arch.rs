use std::str::FromStr;

/// Target CPU architecture of the install.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Architecture {
    X86,
    X64,
    Arm64,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "x64",
            Architecture::Arm64 => "arm64",
        }
    }
}

impl FromStr for Architecture {
    type Err = UnknownArchitecture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86" => Ok(Architecture::X86),
            "x64" => Ok(Architecture::X64),
            "arm64" => Ok(Architecture::Arm64),
            other => Err(UnknownArchitecture(other.to_string())),
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
#[error("Unknown target architecture: {0}")]
pub struct UnknownArchitecture(pub String);

/// Vendor-hosted download URL of the runtime redistributable for the given
/// architecture key. Unsupported keys yield `None`.
pub fn redist_url(architecture: &str) -> Option<&'static str> {
    match architecture {
        "arm64" => Some("https://aka.ms/vs/17/release/vc_redist.arm64.exe"),
        "x64" => Some("https://aka.ms/vs/17/release/vc_redist.x64.exe"),
        "x86" => Some("https://aka.ms/vs/17/release/vc_redist.x86.exe"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_architectures_resolve_to_https_urls() {
        for arch in ["x86", "x64", "arm64"] {
            let url = redist_url(arch).expect("supported architecture must resolve");
            assert!(url.starts_with("https://"), "URL must be HTTPS: {url}");
            assert!(url.contains(arch), "URL must contain the arch token: {url}");
            assert!(url::Url::parse(url).is_ok(), "URL must be well-formed: {url}");
        }
    }

    #[test]
    fn unsupported_architecture_resolves_to_none() {
        assert!(redist_url("mips").is_none());
        assert!(redist_url("").is_none());
        assert!(redist_url("X64").is_none());
    }

    #[test]
    fn architecture_round_trips_through_strings() {
        for arch in [Architecture::X86, Architecture::X64, Architecture::Arm64] {
            assert_eq!(arch.as_str().parse::<Architecture>().unwrap(), arch);
        }
        assert!("mips".parse::<Architecture>().is_err());
    }
}
