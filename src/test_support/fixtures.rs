//! Fixture builders: archives, source trees and release descriptors.

use std::io::Write;
use std::path::Path;

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;

use crate::core::release::ReleaseDescriptor;
use crate::util::hash::sha256_bytes;

/// Create an empty file, with parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

fn tar_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, contents) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, path, contents.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap()
}

/// A `.tar.bz2` archive holding `files` (path, contents).
pub fn tar_bz2(files: &[(&str, &str)]) -> Vec<u8> {
    let mut encoder = BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(&tar_bytes(files)).unwrap();
    encoder.finish().unwrap()
}

/// A `.tar.gz` archive holding `files` (path, contents).
pub fn tar_gz(files: &[(&str, &str)]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&tar_bytes(files)).unwrap();
    encoder.finish().unwrap()
}

/// A release archive laid out like the libusb tarball, under `root`.
pub fn libusb_archive(root: &str) -> Vec<u8> {
    let copying = format!("{}/COPYING", root);
    let configure = format!("{}/configure", root);
    let header = format!("{}/libusb/libusb.h", root);
    let solution = format!("{}/msvc/libusb_2013.sln", root);
    tar_bz2(&[
        (copying.as_str(), "GNU LESSER GENERAL PUBLIC LICENSE"),
        (configure.as_str(), "#!/bin/sh\n"),
        (header.as_str(), "#ifndef LIBUSB_H\n#define LIBUSB_H\n#endif\n"),
        (solution.as_str(), ""),
    ])
}

/// A `demo-1.0` release whose checksum matches `data`.
pub fn test_release(data: &[u8]) -> ReleaseDescriptor {
    let sha256: &'static str = Box::leak(sha256_bytes(data).into_boxed_str());
    ReleaseDescriptor {
        name: "demo",
        version: "1.0",
        homepage: "https://example.invalid/demo",
        sha256,
        license: "MIT",
        description: "test release",
        topics: &["test"],
        url: "https://example.invalid/recipe",
    }
}

/// Populate a source tree as a Visual Studio build would leave it.
pub fn visual_studio_tree(source: &Path, arch_dir: &str, build_type: &str, shared: bool) {
    touch(&source.join("COPYING"));
    touch(&source.join("libusb/libusb.h"));

    let out = source.join(arch_dir).join(build_type);
    if shared {
        for name in [
            "libusb-1.0.dll",
            "libusb-1.0.lib",
            "libusb-usbdk-1.0.dll",
            "libusb-usbdk-1.0.lib",
        ] {
            touch(&out.join("dll").join(name));
        }
    } else {
        for name in ["libusb-1.0.lib", "libusb-usbdk-1.0.lib"] {
            touch(&out.join("lib").join(name));
        }
    }
}
