//! Target description: operating system, compiler, architecture, build type.
//!
//! These are the ambient inputs a recipe run is specialized for. They are
//! closed enumerations so that build dispatch can match on them exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::error::RecipeError;

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    FreeBsd,
    Android,
    Ios,
}

impl Os {
    pub const ALL: [Os; 6] = [
        Os::Windows,
        Os::Linux,
        Os::Macos,
        Os::FreeBsd,
        Os::Android,
        Os::Ios,
    ];

    /// Operating system of the running process.
    pub fn host() -> Result<Os, RecipeError> {
        Os::from_host_name(std::env::consts::OS)
    }

    fn from_host_name(name: &str) -> Result<Os, RecipeError> {
        name.parse().map_err(|_| RecipeError::InvalidSetting {
            setting: "host os",
            value: name.to_string(),
            expected: "a supported host; pass --os explicitly",
        })
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Os::Windows => "Windows",
            Os::Linux => "Linux",
            Os::Macos => "Macos",
            Os::FreeBsd => "FreeBSD",
            Os::Android => "Android",
            Os::Ios => "iOS",
        };
        f.write_str(s)
    }
}

impl FromStr for Os {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win32" | "win" => Ok(Os::Windows),
            "linux" => Ok(Os::Linux),
            "macos" | "darwin" | "osx" => Ok(Os::Macos),
            "freebsd" => Ok(Os::FreeBsd),
            "android" => Ok(Os::Android),
            "ios" => Ok(Os::Ios),
            _ => Err(RecipeError::InvalidSetting {
                setting: "os",
                value: s.to_string(),
                expected: "Windows, Linux, Macos, FreeBSD, Android, iOS",
            }),
        }
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompilerId {
    VisualStudio,
    Gcc,
    Clang,
    AppleClang,
}

impl CompilerId {
    pub const ALL: [CompilerId; 4] = [
        CompilerId::VisualStudio,
        CompilerId::Gcc,
        CompilerId::Clang,
        CompilerId::AppleClang,
    ];
}

impl fmt::Display for CompilerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompilerId::VisualStudio => "Visual Studio",
            CompilerId::Gcc => "gcc",
            CompilerId::Clang => "clang",
            CompilerId::AppleClang => "apple-clang",
        };
        f.write_str(s)
    }
}

impl FromStr for CompilerId {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "visual-studio" | "msvc" | "vs" => Ok(CompilerId::VisualStudio),
            "gcc" | "mingw" => Ok(CompilerId::Gcc),
            "clang" => Ok(CompilerId::Clang),
            "apple-clang" | "appleclang" => Ok(CompilerId::AppleClang),
            _ => Err(RecipeError::InvalidSetting {
                setting: "compiler",
                value: s.to_string(),
                expected: "Visual Studio, gcc, clang, apple-clang",
            }),
        }
    }
}

/// Compiler identity and version.
///
/// The version is kept as the string the toolchain reports (`"12"`,
/// `"9.3"`); only the IDE strategy interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compiler {
    pub id: CompilerId,
    pub version: String,
}

impl Compiler {
    pub fn new(id: CompilerId, version: impl Into<String>) -> Self {
        Compiler {
            id,
            version: version.into(),
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}

/// Target CPU architecture.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arch {
    X86,
    X86_64,
    Armv7,
    Armv8,
}

impl Arch {
    pub const ALL: [Arch; 4] = [Arch::X86, Arch::X86_64, Arch::Armv7, Arch::Armv8];

    /// Architecture of the running process.
    pub fn host() -> Result<Arch, RecipeError> {
        Arch::from_host_name(std::env::consts::ARCH)
    }

    fn from_host_name(name: &str) -> Result<Arch, RecipeError> {
        name.parse().map_err(|_| RecipeError::InvalidSetting {
            setting: "host arch",
            value: name.to_string(),
            expected: "a supported host; pass --arch explicitly",
        })
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Armv7 => "armv7",
            Arch::Armv8 => "armv8",
        };
        f.write_str(s)
    }
}

impl FromStr for Arch {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i686" => Ok(Arch::X86),
            "x86_64" | "x64" | "amd64" => Ok(Arch::X86_64),
            "armv7" | "armhf" | "arm" => Ok(Arch::Armv7),
            "armv8" | "arm64" | "aarch64" => Ok(Arch::Armv8),
            _ => Err(RecipeError::InvalidSetting {
                setting: "arch",
                value: s.to_string(),
                expected: "x86, x86_64, armv7, armv8",
            }),
        }
    }
}

/// Build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Debug => f.write_str("Debug"),
            BuildType::Release => f.write_str("Release"),
        }
    }
}

impl FromStr for BuildType {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            _ => Err(RecipeError::InvalidSetting {
                setting: "build_type",
                value: s.to_string(),
                expected: "Debug, Release",
            }),
        }
    }
}

/// The full target description a run is specialized for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub os: Os,
    pub compiler: Compiler,
    pub arch: Arch,
    pub build_type: BuildType,
}

impl Settings {
    pub fn new(os: Os, compiler: Compiler, arch: Arch, build_type: BuildType) -> Self {
        Settings {
            os,
            compiler,
            arch,
            build_type,
        }
    }

    /// Settings describing the host, with the platform's usual compiler.
    ///
    /// Fails on hosts outside the supported set instead of guessing.
    pub fn host() -> Result<Self, RecipeError> {
        let os = Os::host()?;
        let compiler = match os {
            Os::Windows => Compiler::new(CompilerId::VisualStudio, "15"),
            Os::Macos | Os::Ios => Compiler::new(CompilerId::AppleClang, ""),
            Os::Linux | Os::FreeBsd | Os::Android => Compiler::new(CompilerId::Gcc, ""),
        };
        Ok(Settings::new(os, compiler, Arch::host()?, BuildType::Release))
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / {}",
            self.os, self.compiler, self.arch, self.build_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os_aliases() {
        assert_eq!("Linux".parse::<Os>().unwrap(), Os::Linux);
        assert_eq!("darwin".parse::<Os>().unwrap(), Os::Macos);
        assert_eq!("WINDOWS".parse::<Os>().unwrap(), Os::Windows);
        assert!("plan9".parse::<Os>().is_err());
    }

    #[test]
    fn test_parse_compiler() {
        assert_eq!(
            "Visual Studio".parse::<CompilerId>().unwrap(),
            CompilerId::VisualStudio
        );
        assert_eq!("msvc".parse::<CompilerId>().unwrap(), CompilerId::VisualStudio);
        assert_eq!("apple-clang".parse::<CompilerId>().unwrap(), CompilerId::AppleClang);
        assert_eq!("gcc".parse::<CompilerId>().unwrap(), CompilerId::Gcc);
    }

    #[test]
    fn test_parse_arch() {
        assert_eq!("x86".parse::<Arch>().unwrap(), Arch::X86);
        assert_eq!("amd64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("aarch64".parse::<Arch>().unwrap(), Arch::Armv8);
        let err = "mips".parse::<Arch>().unwrap_err();
        assert!(err.to_string().contains("mips"));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for os in Os::ALL {
            assert_eq!(os.to_string().parse::<Os>().unwrap(), os);
        }
        for id in CompilerId::ALL {
            assert_eq!(id.to_string().parse::<CompilerId>().unwrap(), id);
        }
    }

    #[test]
    fn test_host_names() {
        assert_eq!(Os::from_host_name("macos").unwrap(), Os::Macos);
        assert_eq!(Arch::from_host_name("aarch64").unwrap(), Arch::Armv8);
        assert_eq!(Arch::from_host_name("arm").unwrap(), Arch::Armv7);
    }

    #[test]
    fn test_unknown_host_is_an_error() {
        let err = Os::from_host_name("netbsd").unwrap_err();
        assert!(matches!(err, RecipeError::InvalidSetting { setting: "host os", .. }));
        assert!(err.to_string().contains("--os"));

        let err = Arch::from_host_name("riscv64").unwrap_err();
        assert!(matches!(err, RecipeError::InvalidSetting { setting: "host arch", .. }));
    }

    #[test]
    fn test_build_type_display() {
        assert_eq!(BuildType::Debug.to_string(), "Debug");
        assert_eq!(BuildType::default(), BuildType::Release);
    }
}
