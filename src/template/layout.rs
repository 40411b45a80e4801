//! Where template files live inside a package archive.
//!
//! Layout: `[content/]<template root>/.template.config/template.json`, with an
//! optional `ide.host.json` in the same `.template.config` directory.

pub(crate) const CONFIG_DIR: &str = ".template.config";
pub(crate) const TEMPLATE_FILE: &str = "template.json";
pub(crate) const IDE_HOST_FILE: &str = "ide.host.json";
const CONTENT_DIR: &str = "content";

/// A `template.json` entry and the directories around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation {
    /// Full entry path of the `template.json`
    pub entry: String,
    /// Template root without the `content/` prefix
    pub template_root: String,
    /// Template root directory as it appears in the archive
    pub root_dir: String,
    /// The `.template.config` directory holding the manifest
    pub config_dir: String,
}

impl ManifestLocation {
    /// Path of a file next to `template.json`.
    pub fn sibling(&self, file_name: &str) -> String {
        format!("{}/{}", self.config_dir, file_name)
    }
}

/// Match an archive entry path against the template manifest layout.
pub fn locate_manifest(entry: &str) -> Option<ManifestLocation> {
    let segments: Vec<&str> = entry.split('/').collect();
    let [root_segments @ .., config_dir, file_name] = segments.as_slice() else {
        return None;
    };

    if *config_dir != CONFIG_DIR || *file_name != TEMPLATE_FILE {
        return None;
    }

    let template_segments = match root_segments {
        [first, rest @ ..] if *first == CONTENT_DIR && !rest.is_empty() => rest,
        _ => root_segments,
    };

    let template_root = template_segments.join("/");
    if template_root.is_empty() {
        return None;
    }

    let root_dir = root_segments.join("/");
    Some(ManifestLocation {
        entry: entry.to_string(),
        template_root,
        config_dir: format!("{}/{}", root_dir, CONFIG_DIR),
        root_dir,
    })
}

/// Join a relative path onto an archive directory.
///
/// Backslashes become `/`, `.` segments are dropped and `..` pops a segment.
/// A leading `/` resolves from the archive root.
pub fn resolve_entry_path(base_dir: &str, relative: &str) -> String {
    let relative = relative.replace('\\', "/");

    let mut segments: Vec<&str> = Vec::new();
    let base = if relative.starts_with('/') { "" } else { base_dir };

    for segment in base.split('/').chain(relative.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else {
                    segments.push(segment);
                }
            }
            _ => segments.push(segment),
        }
    }

    segments.join("/")
}
