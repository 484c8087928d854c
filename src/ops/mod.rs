//! High-level operations behind the CLI commands.

pub mod create;
pub mod sysreqs;

pub use create::{create, inspect, CreateOptions};
pub use sysreqs::{system_requirements, PackageTool, SystemPackages};
