//! Source acquisition.
//!
//! Fetches the release archive, checks its checksum, extracts it and moves
//! the release directory to [`SOURCE_SUBFOLDER`] so later phases do not need
//! to know the versioned directory name.

pub mod archive;
pub mod fetch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use fetch::{Fetcher, HttpFetcher};

use crate::core::error::RecipeError;
use crate::core::release::{ReleaseDescriptor, SOURCE_SUBFOLDER};
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};
use crate::util::hash::verify_sha256;

/// Fetch and extract `release` into `<workspace>/source_subfolder`.
///
/// Nothing is written to the workspace unless the archive checksum matches.
pub fn acquire_source(
    release: &ReleaseDescriptor,
    workspace: &Path,
    fetcher: &dyn Fetcher,
) -> Result<PathBuf> {
    let url = release.source_url()?;
    let archive_name = release.archive_name();

    let data = fetcher.fetch(url.as_str(), release.sha256)?;
    verify_sha256(url.as_str(), &data, release.sha256)?;

    ensure_dir(workspace)?;
    let staging = tempfile::Builder::new()
        .prefix(".extract-")
        .tempdir_in(workspace)
        .with_context(|| format!("failed to create staging directory in {}", workspace.display()))?;

    archive::extract(&data, &archive_name, staging.path())?;

    let release_dir = staging.path().join(release.release_name());
    if !release_dir.is_dir() {
        return Err(RecipeError::MissingArtifact {
            pattern: release.release_name(),
            dir: staging.path().to_path_buf(),
        }
        .into());
    }

    let source_dir = workspace.join(SOURCE_SUBFOLDER);
    remove_dir_all_if_exists(&source_dir)?;
    std::fs::rename(&release_dir, &source_dir).with_context(|| {
        format!(
            "failed to move {} to {}",
            release_dir.display(),
            source_dir.display()
        )
    })?;

    tracing::info!("Extracted {} to {}", archive_name, source_dir.display());
    Ok(source_dir)
}
