//! Packaging: lay out build outputs in the package directory.
//!
//! The license is always copied. For Visual Studio builds the header and the
//! binaries are copied out of the solution's output tree; autotools builds
//! installed into the package directory themselves, so their outputs are
//! only recorded.

pub mod info;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use walkdir::WalkDir;

pub use info::{collect_libs, LinkMetadata, PackageInfo};

use crate::builder::BuildStrategy;
use crate::core::error::RecipeError;
use crate::core::settings::{Arch, Settings};
use crate::util::fs::{copy_into, glob_files};

/// What a packaged file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Header,
    SharedLibrary,
    ImportLibrary,
    StaticLibrary,
    License,
}

impl ArtifactKind {
    /// Classify an installed file by name. Returns `None` for files that
    /// are not part of the public package surface (libtool archives,
    /// pkg-config files, ...).
    pub fn classify(path: &Path) -> Option<ArtifactKind> {
        let name = path.file_name()?.to_string_lossy();

        if name.ends_with(".h") {
            Some(ArtifactKind::Header)
        } else if name.ends_with(".dll.a") || name.ends_with(".lib") {
            Some(ArtifactKind::ImportLibrary)
        } else if name.ends_with(".a") {
            Some(ArtifactKind::StaticLibrary)
        } else if name.ends_with(".dll") || name.ends_with(".dylib") || is_shared_object(&name) {
            Some(ArtifactKind::SharedLibrary)
        } else {
            None
        }
    }
}

/// `libfoo.so` or a versioned `libfoo.so.0.1.0`.
fn is_shared_object(name: &str) -> bool {
    name.ends_with(".so") || name.contains(".so.")
}

/// Files in the package, by kind, relative to the package directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageOutput {
    pub files: BTreeMap<ArtifactKind, Vec<PathBuf>>,
}

impl PackageOutput {
    pub fn add(&mut self, kind: ArtifactKind, path: PathBuf) {
        let entry = self.files.entry(kind).or_default();
        if !entry.contains(&path) {
            entry.push(path);
            entry.sort();
        }
    }

    pub fn get(&self, kind: ArtifactKind) -> &[PathBuf] {
        self.files.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Copy files matching `pattern` from `src` into `dst`, flattening paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRule {
    pub pattern: &'static str,
    /// Source directory, relative to the source tree
    pub src: PathBuf,
    /// Destination directory, relative to the package directory
    pub dst: PathBuf,
    pub kind: ArtifactKind,
}

impl CopyRule {
    pub fn new(
        pattern: &'static str,
        src: impl Into<PathBuf>,
        dst: impl Into<PathBuf>,
        kind: ArtifactKind,
    ) -> Self {
        CopyRule {
            pattern,
            src: src.into(),
            dst: dst.into(),
            kind,
        }
    }

    /// Apply the rule. A rule that matches nothing is an error.
    fn apply(&self, source_dir: &Path, package_dir: &Path, output: &mut PackageOutput) -> Result<()> {
        let src_dir = source_dir.join(&self.src);
        let matches = glob_files(&src_dir, self.pattern)?;
        if matches.is_empty() {
            return Err(RecipeError::MissingArtifact {
                pattern: self.pattern.to_string(),
                dir: src_dir,
            }
            .into());
        }

        for file in matches {
            let copied = copy_into(&file, &package_dir.join(&self.dst))?;
            tracing::debug!("Packaged {}", copied.display());
            output.add(self.kind, relative_to(&copied, package_dir));
        }
        Ok(())
    }
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}

/// The license rule, applied on every platform.
pub fn license_rule() -> CopyRule {
    CopyRule::new("COPYING", "", "licenses", ArtifactKind::License)
}

/// Copy rules for a Visual Studio build.
///
/// Binaries come from `<x64|Win32>/<build type>/<dll|lib>` in the source tree.
pub fn visual_studio_rules(settings: &Settings, shared: bool) -> Vec<CopyRule> {
    let arch_dir = match settings.arch {
        Arch::X86_64 => "x64",
        _ => "Win32",
    };
    let out_dir = PathBuf::from(arch_dir)
        .join(settings.build_type.to_string())
        .join(if shared { "dll" } else { "lib" });

    let mut rules = vec![CopyRule::new(
        "libusb.h",
        "libusb",
        Path::new("include").join("libusb-1.0"),
        ArtifactKind::Header,
    )];

    if shared {
        rules.extend([
            CopyRule::new("libusb-1.0.dll", &out_dir, "bin", ArtifactKind::SharedLibrary),
            CopyRule::new("libusb-1.0.lib", &out_dir, "lib", ArtifactKind::ImportLibrary),
            CopyRule::new("libusb-usbdk-1.0.dll", &out_dir, "bin", ArtifactKind::SharedLibrary),
            CopyRule::new("libusb-usbdk-1.0.lib", &out_dir, "lib", ArtifactKind::ImportLibrary),
        ]);
    } else {
        rules.extend([
            CopyRule::new("libusb-1.0.lib", &out_dir, "lib", ArtifactKind::StaticLibrary),
            CopyRule::new("libusb-usbdk-1.0.lib", &out_dir, "lib", ArtifactKind::StaticLibrary),
        ]);
    }

    rules
}

/// Record files an install step already placed in the package directory.
fn record_installed(package_dir: &Path, output: &mut PackageOutput) {
    for sub in ["include", "lib", "bin"] {
        let dir = package_dir.join(sub);
        if !dir.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&dir).into_iter().filter_map(|e| e.ok()) {
            // Installed shared objects are usually symlinks to the versioned file.
            if !entry.path().is_file() {
                continue;
            }
            if let Some(kind) = ArtifactKind::classify(entry.path()) {
                output.add(kind, relative_to(entry.path(), package_dir));
            }
        }
    }
}

/// Lay out the package for a finished build.
pub fn package(
    settings: &Settings,
    shared: bool,
    strategy: BuildStrategy,
    source_dir: &Path,
    package_dir: &Path,
) -> Result<PackageOutput> {
    let mut output = PackageOutput::default();

    license_rule().apply(source_dir, package_dir, &mut output)?;

    match strategy {
        BuildStrategy::IdeProject => {
            for rule in visual_studio_rules(settings, shared) {
                rule.apply(source_dir, package_dir, &mut output)?;
            }
        }
        BuildStrategy::CrossCompileMake | BuildStrategy::NativeMake => {
            record_installed(package_dir, &mut output);
        }
    }

    tracing::info!(
        "Packaged {} files into {}",
        output.files.values().map(Vec::len).sum::<usize>(),
        package_dir.display()
    );
    Ok(output)
}
