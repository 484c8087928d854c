//! libusb-recipe - fetch, build and package libusb
//!
//! This crate turns a target description (OS, compiler, architecture, build
//! type) and a handful of options into a packaged libusb release: it fetches
//! and verifies the source archive, drives libusb's own build system, lays
//! out the results and describes how to link against them.

pub mod builder;
pub mod core;
pub mod ops;
pub mod package;
pub mod sources;
pub mod util;

/// Test doubles for the fetcher and the build tool runner.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    OptionRequest, RecipeError, ReleaseDescriptor, ResolvedConfiguration, Settings, LIBUSB,
};

pub use builder::BuildStrategy;
pub use package::{LinkMetadata, PackageInfo};
pub use util::context::GlobalContext;
