//! Visual Studio solution build.

use std::path::Path;

use anyhow::Result;

use crate::builder::runner::{run_checked, ToolInvocation, ToolRunner};
use crate::core::error::RecipeError;
use crate::core::settings::{Arch, Settings};

/// Solution file for a Visual Studio version, relative to the source tree.
///
/// Versions other than 11 and 12 use the 2015 solution.
pub fn solution_file(compiler_version: &str) -> String {
    let file = match compiler_version {
        "12" => "libusb_2013.sln",
        "11" => "libusb_2012.sln",
        _ => "libusb_2015.sln",
    };
    format!("msvc/{}", file)
}

/// MSBuild platform name for an architecture.
pub fn platform(arch: Arch) -> Result<&'static str, RecipeError> {
    match arch {
        Arch::X86 => Ok("Win32"),
        Arch::X86_64 => Ok("x64"),
        Arch::Armv7 | Arch::Armv8 => Err(RecipeError::UnsupportedConfiguration(format!(
            "no Visual Studio platform for architecture `{}`",
            arch
        ))),
    }
}

/// The MSBuild command for `settings`, run from `source_dir`.
///
/// Project files are built as shipped; no upgrade step is run.
pub fn invocation(settings: &Settings, source_dir: &Path) -> Result<ToolInvocation> {
    let platform = platform(settings.arch)?;

    Ok(ToolInvocation::new("msbuild", source_dir)
        .arg(solution_file(&settings.compiler.version))
        .arg(format!("/p:Configuration={}", settings.build_type))
        .arg(format!("/p:Platform={}", platform))
        .args(["/m", "/nologo"]))
}

/// Build the solution.
pub fn build(settings: &Settings, source_dir: &Path, runner: &dyn ToolRunner) -> Result<()> {
    let inv = invocation(settings, source_dir)?;
    tracing::info!("Building {}", inv.args[0]);
    run_checked(runner, &inv)
}
