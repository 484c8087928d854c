//! Option resolution.
//!
//! The recipe declares three boolean options. Some of them make no sense on
//! some targets, so resolution prunes them: a pruned option is absent, which
//! is different from being set to `false`. Resolution never mutates its
//! inputs; it returns a new [`ResolvedOptions`].

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::core::settings::{CompilerId, Os, Settings};

/// Options as requested by the user, before pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionRequest {
    /// Build shared libraries instead of static ones
    pub shared: bool,
    /// Build with udev device discovery (Linux only)
    pub enable_udev: bool,
    /// Compile position-independent code
    pub fpic: bool,
}

impl Default for OptionRequest {
    fn default() -> Self {
        OptionRequest {
            shared: true,
            enable_udev: true,
            fpic: true,
        }
    }
}

/// Options after platform pruning. `None` means "not applicable here".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    pub shared: bool,
    pub enable_udev: Option<bool>,
    pub fpic: Option<bool>,
}

/// Prune the options that do not apply to `settings`.
pub fn resolve_options(settings: &Settings, request: &OptionRequest) -> ResolvedOptions {
    let enable_udev = match settings.os {
        Os::Linux => Some(request.enable_udev),
        _ => None,
    };

    let fpic = match (settings.os, settings.compiler.id) {
        (Os::Windows, CompilerId::VisualStudio) => None,
        _ => Some(request.fpic),
    };

    ResolvedOptions {
        shared: request.shared,
        enable_udev,
        fpic,
    }
}

/// A reference to another package: `name/version@user/channel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub version: String,
    pub user: String,
    pub channel: String,
}

impl Requirement {
    pub fn new(name: &str, version: &str, user: &str, channel: &str) -> Self {
        Requirement {
            name: name.to_string(),
            version: version.to_string(),
            user: user.to_string(),
            channel: channel.to_string(),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}@{}/{}",
            self.name, self.version, self.user, self.channel
        )
    }
}

impl FromStr for Requirement {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((pkg, owner)) = s.split_once('@') else {
            bail!("invalid package reference `{}`: missing `@user/channel`", s);
        };
        let (Some((name, version)), Some((user, channel))) =
            (pkg.split_once('/'), owner.split_once('/'))
        else {
            bail!("invalid package reference `{}`: expected name/version@user/channel", s);
        };
        if [name, version, user, channel].iter().any(|p| p.is_empty()) {
            bail!("invalid package reference `{}`: empty component", s);
        }
        Ok(Requirement::new(name, version, user, channel))
    }
}

impl Serialize for Requirement {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Name of the udev package the Linux build links against.
pub const UDEV_PACKAGE: &str = "libudev1";

/// External packages the build needs on this target.
///
/// The udev library is required on Linux regardless of `enable_udev`; see
/// [`ResolvedConfiguration::udev_requirement_mismatch`].
pub fn requirements(settings: &Settings) -> Vec<Requirement> {
    match settings.os {
        Os::Linux => vec![Requirement::new(UDEV_PACKAGE, "237", "totemic", "stable")],
        _ => Vec::new(),
    }
}

/// Everything derived from the target description before building.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfiguration {
    pub settings: Settings,
    pub options: ResolvedOptions,
    pub requirements: Vec<Requirement>,
}

impl ResolvedConfiguration {
    /// Resolve options and requirements for `settings`.
    pub fn resolve(settings: Settings, request: &OptionRequest) -> Self {
        let options = resolve_options(&settings, request);
        let requirements = requirements(&settings);
        let config = ResolvedConfiguration {
            settings,
            options,
            requirements,
        };

        if config.udev_requirement_mismatch() {
            tracing::warn!(
                "{} is required although udev support is disabled",
                UDEV_PACKAGE
            );
        }

        config
    }

    /// True when the udev package is required but udev support is off.
    pub fn udev_requirement_mismatch(&self) -> bool {
        self.options.enable_udev == Some(false)
            && self.requirements.iter().any(|r| r.name == UDEV_PACKAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{Arch, BuildType, Compiler};

    fn settings(os: Os, compiler: CompilerId) -> Settings {
        Settings::new(os, Compiler::new(compiler, "12"), Arch::X86_64, BuildType::Release)
    }

    #[test]
    fn test_udev_only_kept_on_linux() {
        for os in Os::ALL {
            for compiler in CompilerId::ALL {
                let resolved = resolve_options(&settings(os, compiler), &OptionRequest::default());
                assert_eq!(resolved.enable_udev.is_some(), os == Os::Linux);
            }
        }
    }

    #[test]
    fn test_fpic_pruned_only_for_visual_studio_on_windows() {
        for os in Os::ALL {
            for compiler in CompilerId::ALL {
                let resolved = resolve_options(&settings(os, compiler), &OptionRequest::default());
                let pruned = os == Os::Windows && compiler == CompilerId::VisualStudio;
                assert_eq!(resolved.fpic.is_none(), pruned, "{} {}", os, compiler);
            }
        }
    }

    #[test]
    fn test_requested_values_carried_over() {
        let request = OptionRequest {
            shared: false,
            enable_udev: false,
            fpic: false,
        };
        let resolved = resolve_options(&settings(Os::Linux, CompilerId::Gcc), &request);
        assert!(!resolved.shared);
        assert_eq!(resolved.enable_udev, Some(false));
        assert_eq!(resolved.fpic, Some(false));
    }

    #[test]
    fn test_requirements_only_on_linux() {
        let linux = requirements(&settings(Os::Linux, CompilerId::Gcc));
        assert_eq!(linux.len(), 1);
        assert_eq!(linux[0].to_string(), "libudev1/237@totemic/stable");

        assert!(requirements(&settings(Os::Macos, CompilerId::AppleClang)).is_empty());
        assert!(requirements(&settings(Os::Windows, CompilerId::Gcc)).is_empty());
    }

    #[test]
    fn test_udev_mismatch_flagged() {
        let request = OptionRequest {
            enable_udev: false,
            ..OptionRequest::default()
        };
        let config = ResolvedConfiguration::resolve(settings(Os::Linux, CompilerId::Gcc), &request);
        assert_eq!(config.requirements.len(), 1);
        assert!(config.udev_requirement_mismatch());

        let config = ResolvedConfiguration::resolve(
            settings(Os::Linux, CompilerId::Gcc),
            &OptionRequest::default(),
        );
        assert!(!config.udev_requirement_mismatch());
    }

    #[test]
    fn test_parse_requirement() {
        let req: Requirement = "libudev1/237@totemic/stable".parse().unwrap();
        assert_eq!(req.name, "libudev1");
        assert_eq!(req.channel, "stable");

        assert!("libudev1/237".parse::<Requirement>().is_err());
        assert!("libudev1@totemic/stable".parse::<Requirement>().is_err());
        assert!("/237@totemic/stable".parse::<Requirement>().is_err());
    }
}
