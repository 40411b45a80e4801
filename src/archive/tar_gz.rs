use crate::runtime::Runtime;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::debug;
use std::io::Read;
use std::path::Path;
use tar::Archive;

use super::{ArchiveEntries, ArchiveFormat};

/// Reader for .tar.gz and .tgz archives
pub struct TarGzFormat;

impl ArchiveFormat for TarGzFormat {
    fn can_handle(&self, archive_path: &Path) -> bool {
        let name = archive_path.to_string_lossy().to_lowercase();
        name.ends_with(".tar.gz") || name.ends_with(".tgz")
    }

    fn open<R: Runtime>(
        &self,
        runtime: &R,
        archive_path: &Path,
    ) -> Result<Box<dyn ArchiveEntries>> {
        Ok(Box::new(TarGzEntries::open(runtime, archive_path)?))
    }
}

/// Entries of a gzip-compressed tar archive.
///
/// Tar has no index, so every file entry is decompressed into memory on open.
pub struct TarGzEntries {
    names: Vec<String>,
    contents: Vec<Vec<u8>>,
}

impl TarGzEntries {
    pub fn open<R: Runtime>(runtime: &R, archive_path: &Path) -> Result<Self> {
        debug!("Opening tar.gz archive {:?}...", archive_path);
        let file = runtime
            .open(archive_path)
            .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;

        let mut archive = Archive::new(GzDecoder::new(file));
        let mut names = Vec::new();
        let mut contents = Vec::new();

        for entry in archive
            .entries()
            .with_context(|| format!("Failed to read tar archive {:?}", archive_path))?
        {
            let mut entry =
                entry.with_context(|| format!("Failed to read tar entry in {:?}", archive_path))?;
            if !entry.header().entry_type().is_file() {
                continue;
            }

            let path = entry
                .path()
                .context("Failed to read tar entry path")?
                .to_string_lossy()
                .replace('\\', "/");
            let name = path.strip_prefix("./").unwrap_or(&path).to_string();

            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .with_context(|| format!("Failed to read tar entry {}", name))?;

            names.push(name);
            contents.push(bytes);
        }

        Ok(Self { names, contents })
    }
}

impl ArchiveEntries for TarGzEntries {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn read(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .names
            .iter()
            .position(|n| n == name)
            .map(|i| self.contents[i].clone()))
    }
}
