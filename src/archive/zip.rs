use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::debug;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

use super::{ArchiveEntries, ArchiveFormat};

const MAX_PREALLOC: u64 = 1024 * 1024;

/// Reader for .zip and .nupkg archives
pub struct ZipFormat;

impl ArchiveFormat for ZipFormat {
    fn can_handle(&self, archive_path: &Path) -> bool {
        let name = archive_path.to_string_lossy().to_lowercase();
        name.ends_with(".zip") || name.ends_with(".nupkg")
    }

    fn open<R: Runtime>(
        &self,
        runtime: &R,
        archive_path: &Path,
    ) -> Result<Box<dyn ArchiveEntries>> {
        Ok(Box::new(ZipEntries::open(runtime, archive_path)?))
    }
}

/// Entries of an opened zip archive.
pub struct ZipEntries {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    names: Vec<String>,
}

impl ZipEntries {
    pub fn open<R: Runtime>(runtime: &R, archive_path: &Path) -> Result<Self> {
        debug!("Opening zip archive {:?}...", archive_path);
        let mut file = runtime
            .open(archive_path)
            .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;

        // ZipArchive needs Read + Seek, Runtime::open only gives Read
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read archive {:?}", archive_path))?;

        let mut archive = ZipArchive::new(Cursor::new(buffer))
            .with_context(|| format!("Failed to parse ZIP archive {:?}", archive_path))?;

        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive
                .by_index_raw(i)
                .with_context(|| format!("Failed to read ZIP entry {}", i))?;
            if !entry.is_dir() {
                names.push(entry.name().to_string());
            }
        }

        Ok(Self { archive, names })
    }
}

impl ArchiveEntries for ZipEntries {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn read(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open ZIP entry {}", name));
            }
        };

        // Header sizes are untrusted, cap the preallocation
        let mut bytes = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
        entry
            .read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read ZIP entry {}", name))?;
        Ok(Some(bytes))
    }
}
