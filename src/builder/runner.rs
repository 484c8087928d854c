//! Build tool invocation.
//!
//! Strategies describe the commands they need as [`ToolInvocation`] values
//! and hand them to a [`ToolRunner`]. The real runner spawns processes; tests
//! substitute a recording runner.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::error::RecipeError;
use crate::util::process::{find_executable, find_make, find_msbuild, ProcessBuilder};

/// A single build tool command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Program name or path (`make`, `./configure`, `msbuild`)
    pub program: String,
    pub args: Vec<String>,
    /// Extra environment for the process
    pub env: Vec<(String, String)>,
    pub cwd: PathBuf,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        ToolInvocation {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Look up an environment entry set on this invocation.
    pub fn get_env(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Exit state of a finished tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOutcome {
    pub success: bool,
    pub code: Option<i32>,
}

impl ToolOutcome {
    pub fn success() -> Self {
        ToolOutcome {
            success: true,
            code: Some(0),
        }
    }

    pub fn failure(code: i32) -> Self {
        ToolOutcome {
            success: false,
            code: Some(code),
        }
    }
}

/// Runs build tools.
pub trait ToolRunner {
    /// Run `invocation` to completion.
    ///
    /// An `Err` means the tool could not be run at all; a tool that ran and
    /// failed is reported through the outcome.
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutcome>;
}

/// Run an invocation and turn a failing exit into [`RecipeError::ToolFailed`].
pub fn run_checked(runner: &dyn ToolRunner, invocation: &ToolInvocation) -> Result<()> {
    tracing::debug!("Running `{}` in {}", invocation.display_command(), invocation.cwd.display());

    let outcome = runner.run(invocation)?;
    if !outcome.success {
        return Err(RecipeError::ToolFailed {
            command: invocation.display_command(),
            code: outcome.code,
        }
        .into());
    }
    Ok(())
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        ProcessRunner
    }

    fn resolve_program(&self, invocation: &ToolInvocation) -> PathBuf {
        let program = Path::new(&invocation.program);
        if program.components().count() > 1 {
            // Relative paths like `./configure` are resolved against the cwd
            return invocation.cwd.join(program);
        }
        let found = match invocation.program.as_str() {
            "make" => find_make(),
            "msbuild" => find_msbuild(),
            other => find_executable(other),
        };
        found.unwrap_or_else(|| program.to_path_buf())
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutcome> {
        let mut pb = ProcessBuilder::new(self.resolve_program(invocation))
            .args(&invocation.args)
            .cwd(&invocation.cwd);
        for (key, value) in &invocation.env {
            pb = pb.env(key, value);
        }

        let status = pb.status()?;
        Ok(ToolOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}
