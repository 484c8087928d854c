//! Profile files.
//!
//! A profile pins settings and options so they need not be repeated on the
//! command line:
//!
//! ```toml
//! [settings]
//! os = "Windows"
//! compiler = "Visual Studio"
//! compiler_version = "12"
//! arch = "x86"
//! build_type = "Release"
//!
//! [options]
//! shared = false
//! ```
//!
//! Two locations are read: the global profile (`profile.toml` in the user
//! config directory) and the project profile (`recipe.toml` in the working
//! directory). Project values take precedence, command-line flags take
//! precedence over both.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::error::RecipeError;
use crate::core::options::OptionRequest;
use crate::core::settings::{Compiler, Settings};

/// A parsed profile. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub settings: ProfileSettings,
    pub options: ProfileOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileSettings {
    pub os: Option<String>,
    pub compiler: Option<String>,
    pub compiler_version: Option<String>,
    pub arch: Option<String>,
    pub build_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileOptions {
    pub shared: Option<bool>,
    pub enable_udev: Option<bool>,
    pub fpic: Option<bool>,
}

impl Profile {
    /// Load a profile from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile: {}", path.display()))?;

        Self::parse(&contents).with_context(|| format!("failed to parse profile: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a profile if the file exists.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(mut self, other: Profile) -> Profile {
        let s = other.settings;
        self.settings.os = s.os.or(self.settings.os);
        self.settings.compiler = s.compiler.or(self.settings.compiler);
        self.settings.compiler_version = s.compiler_version.or(self.settings.compiler_version);
        self.settings.arch = s.arch.or(self.settings.arch);
        self.settings.build_type = s.build_type.or(self.settings.build_type);

        let o = other.options;
        self.options.shared = o.shared.or(self.options.shared);
        self.options.enable_udev = o.enable_udev.or(self.options.enable_udev);
        self.options.fpic = o.fpic.or(self.options.fpic);
        self
    }

    /// Settings with unset fields taken from `host`.
    ///
    /// `host` is only consulted for fields the profile leaves unset, so an
    /// undetectable host is fine as long as the profile names those fields.
    /// If the compiler changes, its version is not inherited from `host`.
    pub fn settings(&self, host: &Result<Settings, RecipeError>) -> Result<Settings> {
        let s = &self.settings;
        let base = || host.as_ref().map_err(|e| anyhow::Error::new(e.clone()));

        let os = match &s.os {
            Some(v) => v.parse()?,
            None => base()?.os,
        };
        let arch = match &s.arch {
            Some(v) => v.parse()?,
            None => base()?.arch,
        };
        let build_type = match &s.build_type {
            Some(v) => v.parse()?,
            None => host.as_ref().map(|h| h.build_type).unwrap_or_default(),
        };
        let compiler = match (&s.compiler, &s.compiler_version) {
            (Some(id), version) => Compiler::new(id.parse()?, version.clone().unwrap_or_default()),
            (None, Some(version)) => Compiler::new(base()?.compiler.id, version.clone()),
            (None, None) => base()?.compiler.clone(),
        };

        Ok(Settings::new(os, compiler, arch, build_type))
    }

    /// Options with unset fields taken from the recipe defaults.
    pub fn options(&self) -> OptionRequest {
        let defaults = OptionRequest::default();
        OptionRequest {
            shared: self.options.shared.unwrap_or(defaults.shared),
            enable_udev: self.options.enable_udev.unwrap_or(defaults.enable_udev),
            fpic: self.options.fpic.unwrap_or(defaults.fpic),
        }
    }
}

/// Load and merge the global and project profiles.
pub fn load_profile(global_path: &Path, project_path: &Path) -> Result<Profile> {
    let global = Profile::load_optional(global_path)?.unwrap_or_default();
    let project = Profile::load_optional(project_path)?.unwrap_or_default();
    Ok(global.merge(project))
}
