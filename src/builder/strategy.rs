//! Build strategy selection.

use std::fmt;

use serde::Serialize;

use crate::core::settings::{CompilerId, Os};

/// How the sources get built on a given target.
///
/// Exactly one strategy is active per run; there is no fallback between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildStrategy {
    /// Visual Studio solution built with MSBuild.
    IdeProject,
    /// configure/make with a MinGW host triple.
    CrossCompileMake,
    /// configure/make for the native platform.
    NativeMake,
}

impl BuildStrategy {
    /// Pick the strategy for an (os, compiler) pair.
    ///
    /// Every pair is spelled out so that adding an `Os` or `CompilerId`
    /// variant fails to compile until it is placed here.
    pub fn select(os: Os, compiler: CompilerId) -> BuildStrategy {
        use BuildStrategy::*;

        match (os, compiler) {
            (Os::Windows, CompilerId::VisualStudio) => IdeProject,
            (Os::Windows, CompilerId::Gcc) => CrossCompileMake,
            (Os::Windows, CompilerId::Clang | CompilerId::AppleClang) => NativeMake,
            (
                Os::Linux | Os::Macos | Os::FreeBsd | Os::Android | Os::Ios,
                CompilerId::VisualStudio
                | CompilerId::Gcc
                | CompilerId::Clang
                | CompilerId::AppleClang,
            ) => NativeMake,
        }
    }
}

impl fmt::Display for BuildStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStrategy::IdeProject => f.write_str("msbuild"),
            BuildStrategy::CrossCompileMake => f.write_str("mingw-autotools"),
            BuildStrategy::NativeMake => f.write_str("autotools"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_pairs() {
        assert_eq!(
            BuildStrategy::select(Os::Windows, CompilerId::VisualStudio),
            BuildStrategy::IdeProject
        );
        assert_eq!(
            BuildStrategy::select(Os::Windows, CompilerId::Gcc),
            BuildStrategy::CrossCompileMake
        );
        assert_eq!(
            BuildStrategy::select(Os::Windows, CompilerId::Clang),
            BuildStrategy::NativeMake
        );
    }

    #[test]
    fn test_selection_is_total_and_stable() {
        for os in Os::ALL {
            for compiler in CompilerId::ALL {
                let first = BuildStrategy::select(os, compiler);
                let second = BuildStrategy::select(os, compiler);
                assert_eq!(first, second);
                if os != Os::Windows {
                    assert_eq!(first, BuildStrategy::NativeMake);
                }
            }
        }
    }
}
