//! Downloading release archives.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::error::RecipeError;
use crate::util::fs::ensure_dir;
use crate::util::hash::{sha256_file, verify_sha256};

/// Retrieves archive bytes that match an expected checksum.
pub trait Fetcher {
    /// Fetch `url` and return its contents.
    ///
    /// Implementations must fail with [`RecipeError::Integrity`] when the
    /// contents do not hash to `sha256`.
    fn fetch(&self, url: &str, sha256: &str) -> Result<Vec<u8>>;
}

/// Fetches over HTTP(S), optionally keeping verified downloads on disk.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    cache_dir: Option<PathBuf>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher { cache_dir: None }
    }

    /// Keep downloads in `dir`, keyed by the last URL segment.
    pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cache_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn cache_path(&self, url: &str) -> Option<PathBuf> {
        let dir = self.cache_dir.as_ref()?;
        let file_name = url.rsplit('/').next().filter(|s| !s.is_empty())?;
        Some(dir.join(file_name))
    }

    fn read_cached(&self, path: &Path, sha256: &str) -> Option<Vec<u8>> {
        if !path.is_file() {
            return None;
        }
        let digest = match sha256_file(path) {
            Ok(digest) => digest,
            Err(e) => {
                tracing::warn!("Ignoring unreadable cached download: {:#}", e);
                return None;
            }
        };
        if !digest.eq_ignore_ascii_case(sha256) {
            tracing::warn!("Ignoring stale cached download {}", path.display());
            return None;
        }

        tracing::info!("Using cached download {}", path.display());
        std::fs::read(path).ok()
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let spinner = download_spinner(url);

        let response = reqwest::blocking::get(url).map_err(|e| {
            spinner.finish_and_clear();
            RecipeError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            spinner.finish_and_clear();
            return Err(RecipeError::Download {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            }
            .into());
        }

        let bytes = response
            .bytes()
            .with_context(|| format!("failed to read response body from {}", url))?;
        spinner.finish_and_clear();

        Ok(bytes.to_vec())
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, sha256: &str) -> Result<Vec<u8>> {
        let cache_path = self.cache_path(url);
        if let Some(data) = cache_path.as_deref().and_then(|p| self.read_cached(p, sha256)) {
            return Ok(data);
        }

        tracing::info!("Downloading {}", url);
        let data = self.download(url)?;
        verify_sha256(url, &data, sha256)?;

        if let Some(path) = cache_path {
            if let Some(parent) = path.parent() {
                ensure_dir(parent)?;
            }
            // Cache writes are best-effort
            if let Err(e) = std::fs::write(&path, &data) {
                tracing::warn!("failed to cache download at {}: {}", path.display(), e);
            }
        }

        Ok(data)
    }
}

fn download_spinner(url: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Downloading {}", url));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
