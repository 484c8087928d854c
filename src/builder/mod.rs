//! Build dispatch.
//!
//! One of three strategies builds the extracted sources, chosen by
//! [`BuildStrategy::select`]. Each strategy only translates the resolved
//! configuration into tool arguments; the tools themselves run through a
//! [`ToolRunner`].

pub mod autotools;
pub mod msbuild;
pub mod runner;
pub mod strategy;

use std::path::{Path, PathBuf};

use anyhow::Result;

pub use autotools::AutotoolsBuild;
pub use runner::{ProcessRunner, ToolInvocation, ToolOutcome, ToolRunner};
pub use strategy::BuildStrategy;

use crate::core::options::ResolvedConfiguration;

/// Directories a build reads from and installs into.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    /// Extracted source tree
    pub source_dir: PathBuf,
    /// Package output directory (install prefix)
    pub package_dir: PathBuf,
}

impl BuildPaths {
    pub fn new(source_dir: impl AsRef<Path>, package_dir: impl AsRef<Path>) -> Self {
        BuildPaths {
            source_dir: source_dir.as_ref().to_path_buf(),
            package_dir: package_dir.as_ref().to_path_buf(),
        }
    }
}

/// Build the sources with the strategy for this configuration.
pub fn dispatch(
    config: &ResolvedConfiguration,
    paths: &BuildPaths,
    runner: &dyn ToolRunner,
) -> Result<BuildStrategy> {
    let settings = &config.settings;
    let strategy = BuildStrategy::select(settings.os, settings.compiler.id);
    tracing::info!("Building {} with {}", settings, strategy);

    match strategy {
        BuildStrategy::IdeProject => {
            msbuild::build(settings, &paths.source_dir, runner)?;
        }
        BuildStrategy::CrossCompileMake => {
            let args = autotools::cross_compile_args(settings, &config.options);
            AutotoolsBuild::new(settings, &config.options, &paths.source_dir, &paths.package_dir, args)
                .win_bash(cfg!(windows))
                .run(runner)?;
        }
        BuildStrategy::NativeMake => {
            let args = autotools::native_args(settings, &config.options);
            AutotoolsBuild::new(settings, &config.options, &paths.source_dir, &paths.package_dir, args)
                .run(runner)?;
        }
    }

    Ok(strategy)
}
