use log::debug;
use std::collections::HashMap;
use std::path::Path;

use crate::catalog::CatalogRecord;

use super::identity::parse_identity;

/// Highest version per package, keyed by lower-cased package name.
///
/// Versions are compared as plain strings, so `"9.0.0"` beats `"10.0.0"`.
/// Paths whose file name is not a package archive name are skipped.
pub fn latest_versions<P: AsRef<Path>>(paths: &[P]) -> HashMap<String, String> {
    let mut latest: HashMap<String, String> = HashMap::new();

    for path in paths {
        let identity = parse_identity(&path.as_ref().to_string_lossy());
        if identity.name.is_empty() {
            debug!("Skipping {:?}: not a package archive name", path.as_ref());
            continue;
        }

        let key = identity.name.to_lowercase();
        match latest.get_mut(&key) {
            Some(version) if *version >= identity.version => {}
            Some(version) => *version = identity.version,
            None => {
                latest.insert(key, identity.version);
            }
        }
    }

    latest
}

/// Annotate catalog records with installation status.
///
/// Built-in packages take precedence over installed ones. The output has
/// the same records in the same order as `catalog`; packages that exist only
/// locally are not added.
#[tracing::instrument(skip_all)]
pub fn merge<B: AsRef<Path>, I: AsRef<Path>>(
    catalog: &[CatalogRecord],
    built_in_paths: &[B],
    installed_paths: &[I],
) -> Vec<CatalogRecord> {
    let built_in = latest_versions(built_in_paths);
    let installed = latest_versions(installed_paths);

    debug!(
        "Reconciling {} catalog record(s) against {} built-in and {} installed package(s)",
        catalog.len(),
        built_in.len(),
        installed.len()
    );

    catalog
        .iter()
        .map(|record| {
            let key = record.id.to_lowercase();
            if let Some(version) = built_in.get(&key) {
                CatalogRecord {
                    is_installed: true,
                    installed_version: Some(version.clone()),
                    is_built_in: true,
                    ..record.clone()
                }
            } else if let Some(version) = installed.get(&key) {
                CatalogRecord {
                    is_installed: true,
                    installed_version: Some(version.clone()),
                    ..record.clone()
                }
            } else {
                CatalogRecord {
                    is_installed: false,
                    ..record.clone()
                }
            }
        })
        .collect()
}
