use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;

use crate::archive::{ArchiveEntries, ArchiveFormat, ArchiveReader};
use crate::package::parse_identity;
use crate::runtime::Runtime;

use super::json::from_lenient_str_with_fields;
use super::layout::{IDE_HOST_FILE, ManifestLocation, locate_manifest, resolve_entry_path};
use super::{CompositeTemplateManifest, IdeHostManifest, ManifestFields, TemplateManifest};

/// Errors that mark an archive as an invalid template package.
#[derive(Debug)]
pub enum ManifestError {
    /// A `template.json` or `ide.host.json` entry is not valid JSON for its schema
    Decode { entry: String, reason: String },
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Decode { entry, reason } => {
                write!(f, "Failed to decode {}: {}", entry, reason)
            }
        }
    }
}

impl std::error::Error for ManifestError {}

/// Read every template manifest in a package archive.
///
/// Returns one record per `template.json`, in archive order. A missing
/// `ide.host.json` or icon leaves the corresponding field empty; a manifest
/// that fails to decode fails the whole call.
#[tracing::instrument(skip(runtime))]
pub fn extract_manifests<R: Runtime>(
    runtime: &R,
    archive_path: &Path,
    is_built_in: bool,
) -> Result<Vec<CompositeTemplateManifest>> {
    let identity = parse_identity(&archive_path.to_string_lossy());

    let mut archive = ArchiveReader::new().open(runtime, archive_path)?;
    let locations: Vec<ManifestLocation> = archive
        .names()
        .iter()
        .filter_map(|name| locate_manifest(name))
        .collect();

    debug!(
        "Found {} template manifest(s) in {:?}",
        locations.len(),
        archive_path
    );

    let mut manifests = Vec::with_capacity(locations.len());
    for location in &locations {
        debug!("Reading template {}", location.template_root);
        let template_manifest: TemplateManifest = read_json(archive.as_mut(), &location.entry)
            .and_then(|m| m.with_context(|| format!("Entry {} is missing", location.entry)))
            .with_context(|| format!("Invalid template package {:?}", archive_path))?;

        let ide_host_manifest: Option<IdeHostManifest> =
            read_json(archive.as_mut(), &location.sibling(IDE_HOST_FILE))
                .with_context(|| format!("Invalid template package {:?}", archive_path))?;

        let base64_icon = match ide_host_manifest.as_ref().and_then(|m| m.icon.as_deref()) {
            Some(icon) => read_icon(archive.as_mut(), location, icon)?,
            None => None,
        };

        manifests.push(CompositeTemplateManifest {
            package_name: identity.name.clone(),
            package_version: identity.version.clone(),
            base64_icon,
            is_built_in,
            template_manifest,
            ide_host_manifest,
        });
    }

    Ok(manifests)
}

fn read_json<T: DeserializeOwned + ManifestFields>(
    archive: &mut dyn ArchiveEntries,
    entry: &str,
) -> Result<Option<T>> {
    let Some(bytes) = archive.read(entry)? else {
        return Ok(None);
    };

    let decode_error = |reason: String| ManifestError::Decode {
        entry: entry.to_string(),
        reason,
    };

    let text = std::str::from_utf8(&bytes).map_err(|e| decode_error(e.to_string()))?;
    let value =
        from_lenient_str_with_fields(text, T::FIELDS).map_err(|e| decode_error(e.to_string()))?;
    Ok(Some(value))
}

/// Load the icon referenced by `ide.host.json` as a data URI.
///
/// The path is tried relative to `.template.config` first, then relative to
/// the template root.
fn read_icon(
    archive: &mut dyn ArchiveEntries,
    location: &ManifestLocation,
    icon: &str,
) -> Result<Option<String>> {
    let mut candidates = vec![resolve_entry_path(&location.config_dir, icon)];
    let from_root = resolve_entry_path(&location.root_dir, icon);
    if !candidates.contains(&from_root) {
        candidates.push(from_root);
    }

    for candidate in candidates {
        let Some(subtype) = image_subtype(&candidate) else {
            warn!("Icon {} has no file extension, skipping", candidate);
            return Ok(None);
        };

        if let Some(bytes) = archive.read(&candidate)? {
            debug!("Using icon {} ({} bytes)", candidate, bytes.len());
            return Ok(Some(format!(
                "data:image/{};base64,{}",
                subtype,
                STANDARD.encode(&bytes)
            )));
        }
    }

    debug!("Icon {} not found for template {}", icon, location.template_root);
    Ok(None)
}

/// File extension without the dot, used as the image MIME subtype.
fn image_subtype(entry: &str) -> Option<&str> {
    let file_name = entry.rsplit('/').next().unwrap_or(entry);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}
