//! Release descriptor: the fixed identity of the upstream artifact.

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

/// Name the extracted source tree is renamed to.
pub const SOURCE_SUBFOLDER: &str = "source_subfolder";

/// The libusb release this recipe packages.
pub const LIBUSB: ReleaseDescriptor = ReleaseDescriptor {
    name: "libusb",
    version: "1.0.22",
    homepage: "https://github.com/libusb/libusb",
    sha256: "75aeb9d59a4fdb800d329a545c2e6799f732362193b465ea198f2aa275518157",
    license: "LGPL-2.1",
    description: "A cross-platform library to access USB devices",
    topics: &["libusb", "usb", "device"],
    url: "http://github.com/jens-totemic/conan-libusb",
};

/// Immutable identity of an upstream release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReleaseDescriptor {
    pub name: &'static str,
    pub version: &'static str,
    /// Project homepage; release archives live under it
    pub homepage: &'static str,
    /// SHA256 of the release archive (lowercase hex)
    pub sha256: &'static str,
    pub license: &'static str,
    pub description: &'static str,
    pub topics: &'static [&'static str],
    /// Where the recipe itself is maintained
    pub url: &'static str,
}

impl ReleaseDescriptor {
    /// `<name>-<version>`, also the top-level directory inside the archive.
    pub fn release_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// File name of the release archive.
    pub fn archive_name(&self) -> String {
        format!("{}.tar.bz2", self.release_name())
    }

    /// Download URL of the release archive.
    pub fn source_url(&self) -> Result<Url> {
        let raw = format!(
            "{}/releases/download/v{}/{}",
            self.homepage,
            self.version,
            self.archive_name()
        );
        Url::parse(&raw).with_context(|| format!("invalid source url: {}", raw))
    }
}
