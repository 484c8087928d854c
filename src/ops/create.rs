//! Full recipe run: source, build, package.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::{self, msbuild, BuildPaths, BuildStrategy, ToolRunner};
use crate::core::options::{OptionRequest, ResolvedConfiguration};
use crate::core::release::ReleaseDescriptor;
use crate::core::settings::Settings;
use crate::package::{self, collect_libs, LinkMetadata, PackageInfo};
use crate::sources::{acquire_source, Fetcher};
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};

/// Inputs for [`create`].
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub release: ReleaseDescriptor,
    pub settings: Settings,
    pub options: OptionRequest,
    /// Directory holding the source tree and the package
    pub workspace: PathBuf,
}

impl CreateOptions {
    pub fn new(release: ReleaseDescriptor, settings: Settings, workspace: impl AsRef<Path>) -> Self {
        CreateOptions {
            release,
            settings,
            options: OptionRequest::default(),
            workspace: workspace.as_ref().to_path_buf(),
        }
    }

    pub fn with_options(mut self, options: OptionRequest) -> Self {
        self.options = options;
        self
    }

    pub fn package_dir(&self) -> PathBuf {
        self.workspace.join("package")
    }
}

/// Reject configurations no strategy can build, before any I/O.
fn preflight(config: &ResolvedConfiguration) -> Result<BuildStrategy> {
    let settings = &config.settings;
    let strategy = BuildStrategy::select(settings.os, settings.compiler.id);
    if strategy == BuildStrategy::IdeProject {
        msbuild::platform(settings.arch)?;
    }
    Ok(strategy)
}

/// Resolve the configuration and describe the package without building it.
pub fn inspect(
    release: &ReleaseDescriptor,
    settings: Settings,
    options: &OptionRequest,
) -> Result<PackageInfo> {
    let config = ResolvedConfiguration::resolve(settings, options);
    let strategy = preflight(&config)?;
    let link = LinkMetadata::for_os(config.settings.os, Vec::new());
    Ok(PackageInfo::new(release, &config, strategy, None, link))
}

/// Fetch, build and package the release.
///
/// Any failure aborts the run; the package directory is only meaningful
/// when this returns `Ok`.
pub fn create(opts: &CreateOptions, fetcher: &dyn Fetcher, runner: &dyn ToolRunner) -> Result<PackageInfo> {
    let config = ResolvedConfiguration::resolve(opts.settings.clone(), &opts.options);
    preflight(&config)?;
    tracing::info!(
        "Creating {} {} for {}",
        opts.release.name,
        opts.release.version,
        config.settings
    );
    tracing::debug!("Resolved options: {:?}", config.options);

    let source_dir = acquire_source(&opts.release, &opts.workspace, fetcher)
        .context("failed to acquire sources")?;

    let package_dir = opts.package_dir();
    remove_dir_all_if_exists(&package_dir)?;
    ensure_dir(&package_dir)?;

    let paths = BuildPaths::new(&source_dir, &package_dir);
    let strategy = builder::dispatch(&config, &paths, runner).context("build failed")?;

    let output = package::package(
        &config.settings,
        config.options.shared,
        strategy,
        &source_dir,
        &package_dir,
    )
    .context("packaging failed")?;

    let libs = collect_libs(&package_dir)?;
    let link = LinkMetadata::for_os(config.settings.os, libs);
    let info = PackageInfo::new(&opts.release, &config, strategy, Some(output), link);
    let info_path = info.write(&package_dir)?;
    tracing::info!("Wrote {}", info_path.display());

    Ok(info)
}
