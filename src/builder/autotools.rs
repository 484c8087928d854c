//! configure/make builds, native and MinGW.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::runner::{run_checked, ToolInvocation, ToolRunner};
use crate::core::options::ResolvedOptions;
use crate::core::settings::{Arch, BuildType, CompilerId, Os, Settings};

/// `--enable-shared/--disable-static` or the reverse. Both flags are always
/// present so configure never falls back to its own default.
pub fn linkage_flags(shared: bool) -> [&'static str; 2] {
    if shared {
        ["--enable-shared", "--disable-static"]
    } else {
        ["--disable-shared", "--enable-static"]
    }
}

/// configure arguments for a MinGW build.
pub fn cross_compile_args(settings: &Settings, options: &ResolvedOptions) -> Vec<String> {
    let mut args: Vec<String> = linkage_flags(options.shared)
        .iter()
        .map(|s| s.to_string())
        .collect();

    match settings.arch {
        Arch::X86_64 => args.push("--host=x86_64-w64-mingw32".to_string()),
        Arch::X86 => {
            args.push("--build=i686-w64-mingw32".to_string());
            args.push("--host=i686-w64-mingw32".to_string());
        }
        Arch::Armv7 | Arch::Armv8 => {}
    }

    args
}

/// configure arguments for a native build.
pub fn native_args(settings: &Settings, options: &ResolvedOptions) -> Vec<String> {
    let mut args: Vec<String> = linkage_flags(options.shared)
        .iter()
        .map(|s| s.to_string())
        .collect();

    if settings.os == Os::Linux {
        // A pruned option cannot happen on Linux, but treat it as disabled
        let udev = options.enable_udev.unwrap_or(false);
        args.push(if udev { "--enable-udev" } else { "--disable-udev" }.to_string());
    }

    args
}

/// Compiler flags derived from the settings, as `CFLAGS` would carry them.
fn cflags(settings: &Settings, options: &ResolvedOptions) -> Vec<&'static str> {
    let mut flags = Vec::new();

    if matches!(
        settings.compiler.id,
        CompilerId::Gcc | CompilerId::Clang | CompilerId::AppleClang
    ) {
        match settings.arch {
            Arch::X86 => flags.push("-m32"),
            Arch::X86_64 => flags.push("-m64"),
            Arch::Armv7 | Arch::Armv8 => {}
        }
    }

    match settings.build_type {
        BuildType::Debug => flags.push("-g"),
        BuildType::Release => flags.push("-O3"),
    }

    if options.fpic == Some(true) {
        flags.push("-fPIC");
    }

    flags
}

/// `path` as MSYS bash sees it: forward slashes, `C:` becomes `/c`.
pub fn msys_path(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        format!("/{}{}", (bytes[0] as char).to_ascii_lowercase(), &path[2..])
    } else {
        path
    }
}

/// `ours` after any flags the caller already exported.
fn append_flags(inherited: Option<&str>, ours: &str) -> String {
    match inherited.map(str::trim).filter(|s| !s.is_empty()) {
        Some(existing) if ours.is_empty() => existing.to_string(),
        Some(existing) => format!("{} {}", existing, ours),
        None => ours.to_string(),
    }
}

/// A configure + make + make install run.
#[derive(Debug, Clone)]
pub struct AutotoolsBuild {
    source_dir: PathBuf,
    prefix: PathBuf,
    configure_args: Vec<String>,
    cflags: Vec<&'static str>,
    ndebug: bool,
    win_bash: bool,
    inherited_cflags: Option<String>,
    inherited_cppflags: Option<String>,
}

impl AutotoolsBuild {
    pub fn new(
        settings: &Settings,
        options: &ResolvedOptions,
        source_dir: &Path,
        prefix: &Path,
        configure_args: Vec<String>,
    ) -> Self {
        AutotoolsBuild {
            source_dir: source_dir.to_path_buf(),
            prefix: prefix.to_path_buf(),
            configure_args,
            cflags: cflags(settings, options),
            ndebug: settings.build_type == BuildType::Release,
            win_bash: false,
            inherited_cflags: std::env::var("CFLAGS").ok(),
            inherited_cppflags: std::env::var("CPPFLAGS").ok(),
        }
    }

    /// Replace the `CFLAGS`/`CPPFLAGS` taken from the environment.
    pub fn inherited_flags(mut self, cflags: Option<String>, cppflags: Option<String>) -> Self {
        self.inherited_cflags = cflags;
        self.inherited_cppflags = cppflags;
        self
    }

    /// Run every step through `bash -c`, as MSYS requires on Windows hosts.
    pub fn win_bash(mut self, enabled: bool) -> Self {
        self.win_bash = enabled;
        self
    }

    fn tool(&self, command_line: Vec<String>) -> Result<ToolInvocation> {
        let inv = if self.win_bash {
            let script = shlex::try_join(command_line.iter().map(String::as_str))
                .with_context(|| format!("cannot quote command for bash: {:?}", command_line))?;
            ToolInvocation::new("bash", &self.source_dir).arg("-c").arg(script)
        } else {
            let mut parts = command_line.into_iter();
            let program = parts.next().unwrap_or_default();
            ToolInvocation::new(program, &self.source_dir).args(parts)
        };

        let cflags = append_flags(self.inherited_cflags.as_deref(), &self.cflags.join(" "));
        let cppflags = append_flags(
            self.inherited_cppflags.as_deref(),
            if self.ndebug { "-DNDEBUG" } else { "" },
        );

        let inv = inv.env("CFLAGS", cflags);
        Ok(if cppflags.is_empty() {
            inv
        } else {
            inv.env("CPPFLAGS", cppflags)
        })
    }

    /// The three commands this build runs, in order.
    pub fn invocations(&self) -> Result<Vec<ToolInvocation>> {
        let prefix = if self.win_bash {
            msys_path(&self.prefix)
        } else {
            self.prefix.display().to_string()
        };
        let mut configure = vec!["./configure".to_string(), format!("--prefix={}", prefix)];
        configure.extend(self.configure_args.iter().cloned());

        Ok(vec![
            self.tool(configure)?,
            self.tool(vec!["make".to_string()])?,
            self.tool(vec!["make".to_string(), "install".to_string()])?,
        ])
    }

    /// Configure, build and install.
    pub fn run(&self, runner: &dyn ToolRunner) -> Result<()> {
        tracing::info!("Configuring with {}", self.configure_args.join(" "));
        for inv in self.invocations()? {
            run_checked(runner, &inv)?;
        }
        Ok(())
    }
}
