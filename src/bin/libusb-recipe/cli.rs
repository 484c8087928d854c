//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Fetch, build and package libusb for a target platform
#[derive(Parser)]
#[command(name = "libusb-recipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, build and package libusb
    Create(CreateArgs),

    /// Fetch and extract the libusb sources only
    Source(SourceArgs),

    /// Show the resolved configuration without building
    Info(InfoArgs),

    /// Show which system packages provide the udev headers
    Sysreqs(SysreqsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Target description and options. Unset values come from the profiles,
/// then from the host.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Profile file to use instead of ./recipe.toml
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Target operating system (Windows, Linux, Macos, ...)
    #[arg(long)]
    pub os: Option<String>,

    /// Compiler (Visual Studio, gcc, clang, apple-clang)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Compiler version (e.g. 12 for Visual Studio 2013)
    #[arg(long)]
    pub compiler_version: Option<String>,

    /// Target architecture (x86, x86_64, armv7, armv8)
    #[arg(long)]
    pub arch: Option<String>,

    /// Build type (Debug, Release)
    #[arg(long)]
    pub build_type: Option<String>,

    /// Build shared libraries
    #[arg(long, conflicts_with = "static_")]
    pub shared: bool,

    /// Build static libraries
    #[arg(long = "static", id = "static_")]
    pub static_: bool,

    /// Build without udev support (Linux)
    #[arg(long)]
    pub no_udev: bool,

    /// Build without position-independent code
    #[arg(long)]
    pub no_fpic: bool,
}

#[derive(Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Directory for sources and the package (default: ./recipe-build)
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Always download, ignoring the download cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Directory to extract into (default: ./recipe-build)
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Always download, ignoring the download cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the package info as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SysreqsArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
