//! Core data model: release identity, target settings, options, errors.

pub mod error;
pub mod options;
pub mod release;
pub mod settings;

pub use error::RecipeError;
pub use options::{OptionRequest, Requirement, ResolvedConfiguration, ResolvedOptions};
pub use release::{ReleaseDescriptor, LIBUSB, SOURCE_SUBFOLDER};
pub use settings::{Arch, BuildType, Compiler, CompilerId, Os, Settings};
