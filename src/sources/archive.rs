//! Release archive extraction.

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use tar::Archive;

/// Compression of a tar archive, from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarBz2,
    TarGz,
    Tar,
}

impl ArchiveFormat {
    pub fn from_name(name: &str) -> Option<ArchiveFormat> {
        if name.ends_with(".tar.bz2") || name.ends_with(".tbz2") {
            Some(ArchiveFormat::TarBz2)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else if name.ends_with(".tar") {
            Some(ArchiveFormat::Tar)
        } else {
            None
        }
    }
}

/// Extract an in-memory archive into `dest`.
///
/// Entries that would land outside `dest` abort the extraction.
pub fn extract(data: &[u8], archive_name: &str, dest: &Path) -> Result<()> {
    let Some(format) = ArchiveFormat::from_name(archive_name) else {
        bail!("unsupported archive format: {}", archive_name);
    };

    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create destination directory: {}", dest.display()))?;

    let cursor = Cursor::new(data);
    match format {
        ArchiveFormat::TarBz2 => unpack(BzDecoder::new(cursor), dest),
        ArchiveFormat::TarGz => unpack(GzDecoder::new(cursor), dest),
        ArchiveFormat::Tar => unpack(cursor, dest),
    }
    .with_context(|| format!("failed to extract {}", archive_name))
}

fn unpack<R: Read>(reader: R, dest: &Path) -> Result<()> {
    let mut archive = Archive::new(reader);
    archive.set_preserve_permissions(true);

    for entry in archive.entries().context("failed to read archive entries")? {
        let mut entry = entry.context("failed to read archive entry")?;
        let entry_path = entry
            .path()
            .context("failed to get entry path")?
            .to_string_lossy()
            .into_owned();

        let unpacked = entry
            .unpack_in(dest)
            .with_context(|| format!("failed to unpack {}", entry_path))?;
        if !unpacked {
            bail!("archive entry escapes destination directory: {}", entry_path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{tar_bz2, tar_gz};
    use tempfile::TempDir;

    #[test]
    fn test_format_from_name() {
        assert_eq!(
            ArchiveFormat::from_name("libusb-1.0.22.tar.bz2"),
            Some(ArchiveFormat::TarBz2)
        );
        assert_eq!(ArchiveFormat::from_name("zlib.tgz"), Some(ArchiveFormat::TarGz));
        assert_eq!(ArchiveFormat::from_name("x.tar"), Some(ArchiveFormat::Tar));
        assert_eq!(ArchiveFormat::from_name("x.zip"), None);
    }

    #[test]
    fn test_extract_bz2() {
        let data = tar_bz2(&[("libusb-1.0.22/COPYING", "license"), ("libusb-1.0.22/configure", "#!/bin/sh")]);
        let tmp = TempDir::new().unwrap();

        extract(&data, "libusb-1.0.22.tar.bz2", tmp.path()).unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("libusb-1.0.22/COPYING")).unwrap(),
            "license"
        );
    }

    #[test]
    fn test_extract_gz() {
        let data = tar_gz(&[("pkg-1/README", "hi")]);
        let tmp = TempDir::new().unwrap();

        extract(&data, "pkg-1.tar.gz", tmp.path()).unwrap();
        assert!(tmp.path().join("pkg-1/README").is_file());
    }

    #[test]
    fn test_extract_rejects_unknown_format() {
        let tmp = TempDir::new().unwrap();
        assert!(extract(b"", "pkg.zip", tmp.path()).is_err());
    }

    #[test]
    fn test_extract_corrupt_data() {
        let tmp = TempDir::new().unwrap();
        assert!(extract(b"not an archive", "pkg.tar.bz2", tmp.path()).is_err());
    }
}
