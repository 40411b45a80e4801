//! Read-only access to package archive entries.
//!
//! Template packages are usually `.nupkg` (zip) files; gzip-compressed tar
//! archives are read as well. Each open reads the whole container once and
//! the handle is dropped when the returned entries go out of scope.

mod tar_gz;
mod zip;

use crate::runtime::Runtime;
use anyhow::{Result, anyhow};
use std::path::Path;

pub use tar_gz::{TarGzEntries, TarGzFormat};
pub use zip::{ZipEntries, ZipFormat};

/// Entries of an opened archive.
pub trait ArchiveEntries {
    /// File entry paths in archive order, `/`-separated. Directories are excluded.
    fn names(&self) -> &[String];

    /// Full contents of the named entry, or `None` if there is no such entry.
    fn read(&mut self, name: &str) -> Result<Option<Vec<u8>>>;
}

/// Trait for format-specific archive readers
pub trait ArchiveFormat: Send + Sync {
    /// Check if this reader can handle the given archive format
    fn can_handle(&self, archive_path: &Path) -> bool;

    /// Open the archive and index its entries
    fn open<R: Runtime>(&self, runtime: &R, archive_path: &Path)
    -> Result<Box<dyn ArchiveEntries>>;
}

/// Dispatcher that selects the appropriate reader based on archive format.
pub struct ArchiveReader {
    tar_gz: TarGzFormat,
    zip: ZipFormat,
}

impl Default for ArchiveReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveReader {
    pub fn new() -> Self {
        Self {
            tar_gz: TarGzFormat,
            zip: ZipFormat,
        }
    }
}

impl ArchiveFormat for ArchiveReader {
    fn can_handle(&self, archive_path: &Path) -> bool {
        self.tar_gz.can_handle(archive_path) || self.zip.can_handle(archive_path)
    }

    #[tracing::instrument(skip(self, runtime, archive_path))]
    fn open<R: Runtime>(
        &self,
        runtime: &R,
        archive_path: &Path,
    ) -> Result<Box<dyn ArchiveEntries>> {
        if self.zip.can_handle(archive_path) {
            return self.zip.open(runtime, archive_path);
        }
        if self.tar_gz.can_handle(archive_path) {
            return self.tar_gz.open(runtime, archive_path);
        }
        Err(anyhow!(
            "Unsupported archive format: {}",
            archive_path.display()
        ))
    }
}
