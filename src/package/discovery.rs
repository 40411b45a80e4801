use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

use super::identity::has_archive_extension;

/// Find package archives directly inside `dir`.
///
/// A missing directory yields an empty list. Results are sorted by path.
#[tracing::instrument(skip(runtime, dir))]
pub fn find_package_archives<R: Runtime>(runtime: &R, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();

    if !runtime.exists(dir) {
        debug!("Package directory {:?} does not exist", dir);
        return Ok(archives);
    }

    for path in runtime.read_dir(dir)? {
        let is_archive = path
            .file_name()
            .map(|name| has_archive_extension(&name.to_string_lossy()))
            .unwrap_or(false);
        if is_archive && !runtime.is_dir(&path) {
            archives.push(path);
        }
    }

    archives.sort();
    Ok(archives)
}

/// Find template packages shipped with the SDKs.
///
/// Directory structure: `<templates_root>/<sdk-version>/<package>.nupkg`
#[tracing::instrument(skip(runtime, templates_root))]
pub fn find_built_in_packages<R: Runtime>(
    runtime: &R,
    templates_root: &Path,
) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();

    if !runtime.exists(templates_root) {
        debug!("Templates root {:?} does not exist", templates_root);
        return Ok(archives);
    }

    for sdk_dir in runtime.read_dir(templates_root)? {
        if runtime.is_dir(&sdk_dir) {
            archives.extend(find_package_archives(runtime, &sdk_dir)?);
        }
    }

    archives.sort();
    Ok(archives)
}
