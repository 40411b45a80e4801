pub mod archive;
pub mod catalog;
pub mod commands;
pub mod installer;
pub mod package;
pub mod runtime;
pub mod service;
pub mod template;

/// Archive fixtures shared by unit tests.
#[cfg(test)]
pub mod test_utils {
    use anyhow::Result;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::fs::File;
    use std::io::{Cursor, Seek, Write};
    use std::path::Path;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    fn fill_zip<W: Write + Seek>(zip: &mut ZipWriter<W>, files: &[(&str, &[u8])]) -> Result<()> {
        let options: FileOptions<()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, content) in files {
            if name.ends_with('/') {
                zip.add_directory(*name, options)?;
            } else {
                zip.start_file(*name, options)?;
                zip.write_all(content)?;
            }
        }
        Ok(())
    }

    /// Write a zip archive (also used for `.nupkg`) with the given entries.
    /// Names ending in `/` become directory entries.
    pub fn write_zip(path: &Path, files: &[(&str, &[u8])]) -> Result<()> {
        let mut zip = ZipWriter::new(File::create(path)?);
        fill_zip(&mut zip, files)?;
        zip.finish()?;
        Ok(())
    }

    /// Same as [`write_zip`] but in memory.
    pub fn zip_bytes(files: &[(&str, &[u8])]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        fill_zip(&mut zip, files)?;
        Ok(zip.finish()?.into_inner())
    }

    pub fn write_tar_gz(path: &Path, files: &[(&str, &[u8])]) -> Result<()> {
        let enc = GzEncoder::new(File::create(path)?, Compression::default());
        let mut tar = tar::Builder::new(enc);

        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_path(name)?;
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            tar.append(&header, *content)?;
        }

        tar.into_inner()?.finish()?;
        Ok(())
    }
}
