//! Host package hints for the udev development files.
//!
//! Building with udev on Linux needs the distribution's udev headers. This
//! works out which package provides them for the detected package manager
//! and architecture pair. Nothing is installed; callers print the hint.

use std::fmt;

use crate::core::options::ResolvedConfiguration;
use crate::core::settings::{Arch, Os};
use crate::util::process::find_executable;

/// Host package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageTool {
    Apt,
    Yum,
    Zypper,
    Pacman,
}

impl PackageTool {
    /// Detect the package manager on PATH.
    pub fn detect() -> Option<PackageTool> {
        [
            ("apt-get", PackageTool::Apt),
            ("yum", PackageTool::Yum),
            ("zypper", PackageTool::Zypper),
            ("pacman", PackageTool::Pacman),
        ]
        .into_iter()
        .find(|(program, _)| find_executable(program).is_some())
        .map(|(_, tool)| tool)
    }

    fn install_prefix(self) -> &'static [&'static str] {
        match self {
            PackageTool::Apt => &["apt-get", "install", "-y"],
            PackageTool::Yum => &["yum", "install", "-y"],
            PackageTool::Zypper => &["zypper", "--non-interactive", "install"],
            PackageTool::Pacman => &["pacman", "-S", "--noconfirm"],
        }
    }
}

impl fmt::Display for PackageTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PackageTool::Apt => "apt",
            PackageTool::Yum => "yum",
            PackageTool::Zypper => "zypper",
            PackageTool::Pacman => "pacman",
        };
        f.write_str(s)
    }
}

/// Packages to install through a package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPackages {
    pub tool: PackageTool,
    pub packages: Vec<String>,
}

impl SystemPackages {
    pub fn install_command(&self) -> String {
        let mut parts: Vec<String> = self
            .tool
            .install_prefix()
            .iter()
            .map(|s| s.to_string())
            .collect();
        parts.extend(self.packages.iter().cloned());
        parts.join(" ")
    }
}

/// Package name(s) providing udev headers for `target` on a `host` machine.
pub fn udev_packages(tool: PackageTool, host: Arch, target: Arch) -> Vec<String> {
    let cross_32 = host == Arch::X86_64 && target == Arch::X86;
    let x86_host = matches!(host, Arch::X86 | Arch::X86_64);

    match tool {
        PackageTool::Apt => {
            let suffix = if cross_32 {
                ":i386"
            } else if x86_host && target == Arch::Armv7 {
                ":armhf"
            } else if x86_host && target == Arch::Armv8 {
                ":arm64"
            } else {
                ""
            };
            vec![format!("libudev-dev{}", suffix)]
        }
        PackageTool::Yum => {
            let suffix = if cross_32 { ".i686" } else { "" };
            vec![format!("libudev-devel{}", suffix)]
        }
        PackageTool::Zypper => {
            let name = if cross_32 {
                "libudev-devel-32bit"
            } else {
                "libudev-devel"
            };
            vec![name.to_string()]
        }
        PackageTool::Pacman => vec!["libsystemd".to_string(), "systemd".to_string()],
    }
}

/// System packages the configuration needs, if any.
///
/// Only Linux builds with udev enabled need anything.
pub fn system_requirements(
    config: &ResolvedConfiguration,
    host: Arch,
    tool: Option<PackageTool>,
) -> Option<SystemPackages> {
    if config.settings.os != Os::Linux || config.options.enable_udev != Some(true) {
        return None;
    }

    let Some(tool) = tool else {
        tracing::warn!("Could not determine udev package: no known package manager found");
        return None;
    };

    Some(SystemPackages {
        tool,
        packages: udev_packages(tool, host, config.settings.arch),
    })
}
