//! Test doubles for the recipe's external collaborators.
//!
//! Build tools and downloads are the only side effects the orchestration
//! has, so tests swap them for [`RecordingRunner`] and [`StaticFetcher`]:
//!
//! ```rust,ignore
//! let runner = RecordingRunner::new()
//!     .fail_on("make", 2)
//!     .creates_on("make install", pkg.join("lib/libusb-1.0.so"));
//! ```

pub mod fixtures;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;

use crate::builder::runner::{ToolInvocation, ToolOutcome, ToolRunner};
use crate::sources::Fetcher;

pub use fixtures::*;

/// A [`ToolRunner`] that records invocations instead of running them.
///
/// Commands are matched by their display form: a pattern matches the whole
/// command or its leading words (`"./configure"` matches
/// `"./configure --prefix=/pkg"`).
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<ToolInvocation>>,
    failures: Vec<(String, i32)>,
    creates: Vec<(String, PathBuf)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        RecordingRunner::default()
    }

    /// Make commands matching `pattern` exit with `code`.
    pub fn fail_on(mut self, pattern: &str, code: i32) -> Self {
        self.failures.push((pattern.to_string(), code));
        self
    }

    /// Create an empty file at `path` when a command matching `pattern` runs.
    pub fn creates_on(mut self, pattern: &str, path: impl Into<PathBuf>) -> Self {
        self.creates.push((pattern.to_string(), path.into()));
        self
    }

    /// Invocations seen so far, in order.
    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    fn matches(pattern: &str, command: &str) -> bool {
        command == pattern || command.starts_with(&format!("{} ", pattern))
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutcome> {
        self.invocations.lock().unwrap().push(invocation.clone());
        let command = invocation.display_command();

        if let Some((_, code)) = self
            .failures
            .iter()
            .find(|(pattern, _)| Self::matches(pattern, &command))
        {
            return Ok(ToolOutcome::failure(*code));
        }

        for (pattern, path) in &self.creates {
            if Self::matches(pattern, &command) {
                touch(path);
            }
        }

        Ok(ToolOutcome::success())
    }
}

/// A [`Fetcher`] that serves fixed bytes without checking them.
#[derive(Debug)]
pub struct StaticFetcher {
    data: Vec<u8>,
    count: AtomicUsize,
}

impl StaticFetcher {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        StaticFetcher {
            data: data.into(),
            count: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, _url: &str, _sha256: &str) -> Result<Vec<u8>> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matching() {
        assert!(RecordingRunner::matches("make", "make"));
        assert!(RecordingRunner::matches("make", "make install"));
        assert!(RecordingRunner::matches("./configure", "./configure --prefix=/pkg"));
        assert!(!RecordingRunner::matches("make", "makeinfo"));
    }

    #[test]
    fn test_static_fetcher_counts() {
        let fetcher = StaticFetcher::new(b"abc".to_vec());
        assert_eq!(fetcher.fetch("u", "h").unwrap(), b"abc");
        assert_eq!(fetcher.fetch_count(), 1);
    }
}
