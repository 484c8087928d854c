//! Error types for recipe operations.
//!
//! Every variant is fatal: the run is aborted and no usable package is left
//! behind. Orchestration code wraps these in `anyhow` with context, so
//! callers that care about the kind can `downcast_ref::<RecipeError>()`.

use std::path::PathBuf;

use thiserror::Error;

/// A fatal recipe failure.
#[derive(Debug, Clone, Error)]
pub enum RecipeError {
    #[error("checksum mismatch for {url}\n  expected: {expected}\n  actual:   {actual}")]
    Integrity {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    #[error("`{command}` failed with exit code {code:?}")]
    ToolFailed { command: String, code: Option<i32> },

    #[error("expected artifact not found: `{pattern}` in {}", .dir.display())]
    MissingArtifact { pattern: String, dir: PathBuf },

    #[error("invalid value `{value}` for setting `{setting}` (expected one of: {expected})")]
    InvalidSetting {
        setting: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_message_shows_both_hashes() {
        let err = RecipeError::Integrity {
            url: "https://example.com/a.tar.bz2".to_string(),
            expected: "aaaa".to_string(),
            actual: "bbbb".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected: aaaa"));
        assert!(msg.contains("actual:   bbbb"));
    }

    #[test]
    fn test_missing_artifact_message() {
        let err = RecipeError::MissingArtifact {
            pattern: "libusb-1.0.dll".to_string(),
            dir: PathBuf::from("x64/Release/dll"),
        };
        assert!(err.to_string().contains("libusb-1.0.dll"));
    }
}
