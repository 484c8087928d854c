//! Link metadata and the package description consumers read.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::BuildStrategy;
use crate::core::options::{Requirement, ResolvedConfiguration, ResolvedOptions};
use crate::core::release::ReleaseDescriptor;
use crate::core::settings::{Os, Settings};
use crate::package::PackageOutput;
use crate::util::fs::write_string;

/// File name of the serialized [`PackageInfo`] inside the package.
pub const PACKAGE_INFO_FILE: &str = "package_info.json";

/// Link names of the libraries in `<package_dir>/lib`.
///
/// `libfoo.a` and `libfoo.so` become `foo`; MSVC `.lib` files keep their
/// full stem. Versioned shared objects (`libfoo.so.1`) are skipped in favor
/// of their unversioned link.
pub fn collect_libs(package_dir: &Path) -> Result<Vec<String>> {
    let lib_dir = package_dir.join("lib");
    if !lib_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut libs = Vec::new();
    for entry in std::fs::read_dir(&lib_dir)
        .with_context(|| format!("failed to read directory: {}", lib_dir.display()))?
    {
        let entry = entry?;
        // Follows symlinks: libtool installs `libfoo.so` as a link.
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = link_name(&entry.file_name().to_string_lossy()) {
            libs.push(name);
        }
    }

    libs.sort();
    libs.dedup();
    Ok(libs)
}

fn link_name(file_name: &str) -> Option<String> {
    if let Some(stem) = file_name.strip_suffix(".lib") {
        return Some(stem.to_string());
    }

    let stem = [".dll.a", ".a", ".so", ".dylib"]
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))?;
    Some(stem.strip_prefix("lib").unwrap_or(stem).to_string())
}

/// What a downstream build needs to link against the package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkMetadata {
    /// Libraries from the package itself
    pub libs: Vec<String>,
    /// Include directories, relative to the package root
    pub include_dirs: Vec<PathBuf>,
    /// Platform libraries that must follow `libs`
    pub system_libs: Vec<String>,
    /// Apple frameworks
    pub frameworks: Vec<String>,
    /// Linker flags for `frameworks`
    pub link_flags: Vec<String>,
}

impl LinkMetadata {
    /// Metadata for `os` given the libraries found in the package.
    pub fn for_os(os: Os, libs: Vec<String>) -> Self {
        let (system_libs, frameworks) = match os {
            Os::Linux => (vec!["pthread"], vec![]),
            Os::Macos => (vec!["objc"], vec!["IOKit", "CoreFoundation"]),
            Os::Windows | Os::FreeBsd | Os::Android | Os::Ios => (vec![], vec![]),
        };

        LinkMetadata {
            libs,
            include_dirs: vec![PathBuf::from("include"), Path::new("include").join("libusb-1.0")],
            system_libs: system_libs.iter().map(|s| s.to_string()).collect(),
            frameworks: frameworks.iter().map(|s| s.to_string()).collect(),
            link_flags: frameworks
                .iter()
                .map(|f| format!("-Wl,-framework,{}", f))
                .collect(),
        }
    }

    /// Flat link line: package libs, system libs, then framework flags.
    pub fn link_args(&self) -> Vec<String> {
        self.libs
            .iter()
            .chain(&self.system_libs)
            .chain(&self.link_flags)
            .cloned()
            .collect()
    }
}

/// Everything known about a package: identity, configuration, contents and
/// link metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub license: String,
    pub description: String,
    pub homepage: String,
    pub url: String,
    pub topics: Vec<String>,
    pub settings: Settings,
    pub options: ResolvedOptions,
    pub requirements: Vec<Requirement>,
    pub strategy: BuildStrategy,
    pub udev_requirement_mismatch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PackageOutput>,
    pub link: LinkMetadata,
}

impl PackageInfo {
    pub fn new(
        release: &ReleaseDescriptor,
        config: &ResolvedConfiguration,
        strategy: BuildStrategy,
        output: Option<PackageOutput>,
        link: LinkMetadata,
    ) -> Self {
        PackageInfo {
            name: release.name.to_string(),
            version: release.version.to_string(),
            license: release.license.to_string(),
            description: release.description.to_string(),
            homepage: release.homepage.to_string(),
            url: release.url.to_string(),
            topics: release.topics.iter().map(|t| t.to_string()).collect(),
            settings: config.settings.clone(),
            options: config.options,
            requirements: config.requirements.clone(),
            strategy,
            udev_requirement_mismatch: config.udev_requirement_mismatch(),
            output,
            link,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize package info")
    }

    /// Write to `<package_dir>/package_info.json`.
    pub fn write(&self, package_dir: &Path) -> Result<PathBuf> {
        let path = package_dir.join(PACKAGE_INFO_FILE);
        write_string(&path, &self.to_json()?)?;
        Ok(path)
    }
}
