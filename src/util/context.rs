//! Global context for recipe operations.
//!
//! Provides centralized access to the working directory and the user-level
//! config and cache locations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Name of the project-level profile file.
pub const PROJECT_PROFILE: &str = "recipe.toml";

/// Default workspace directory, relative to the working directory.
pub const DEFAULT_WORKSPACE: &str = "recipe-build";

/// Paths shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    cwd: PathBuf,
    config_dir: PathBuf,
    cache_dir: PathBuf,
}

impl GlobalContext {
    /// Create a context for the current process.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let (config_dir, cache_dir) = match ProjectDirs::from("", "", "libusb-recipe") {
            Some(dirs) => (dirs.config_dir().to_path_buf(), dirs.cache_dir().to_path_buf()),
            None => {
                let fallback = cwd.join(".libusb-recipe");
                (fallback.clone(), fallback.join("cache"))
            }
        };

        Ok(GlobalContext {
            cwd,
            config_dir,
            cache_dir,
        })
    }

    /// Create a context rooted at explicit paths.
    pub fn with_paths(cwd: &Path, config_dir: &Path, cache_dir: &Path) -> Self {
        GlobalContext {
            cwd: cwd.to_path_buf(),
            config_dir: config_dir.to_path_buf(),
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    /// Global profile path.
    pub fn global_profile_path(&self) -> PathBuf {
        self.config_dir.join("profile.toml")
    }

    /// Project profile path.
    pub fn project_profile_path(&self) -> PathBuf {
        self.cwd.join(PROJECT_PROFILE)
    }

    /// Where verified downloads are kept.
    pub fn download_cache_dir(&self) -> PathBuf {
        self.cache_dir.join("downloads")
    }

    /// Resolve a workspace argument against the working directory.
    pub fn workspace(&self, arg: Option<&Path>) -> PathBuf {
        match arg {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.cwd.join(path),
            None => self.cwd.join(DEFAULT_WORKSPACE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let ctx = GlobalContext::with_paths(
            Path::new("/work"),
            Path::new("/home/u/.config/libusb-recipe"),
            Path::new("/home/u/.cache/libusb-recipe"),
        );

        assert_eq!(ctx.project_profile_path(), Path::new("/work/recipe.toml"));
        assert_eq!(
            ctx.global_profile_path(),
            Path::new("/home/u/.config/libusb-recipe/profile.toml")
        );
        assert_eq!(
            ctx.download_cache_dir(),
            Path::new("/home/u/.cache/libusb-recipe/downloads")
        );
    }

    #[test]
    fn test_workspace_resolution() {
        let ctx = GlobalContext::with_paths(Path::new("/work"), Path::new("/c"), Path::new("/k"));

        assert_eq!(ctx.workspace(None), Path::new("/work/recipe-build"));
        assert_eq!(ctx.workspace(Some(Path::new("out"))), Path::new("/work/out"));
    }
}
