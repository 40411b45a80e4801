use anyhow::Result;
use log::debug;
use std::path::Path;
use std::sync::Arc;

use crate::{
    catalog::CatalogCache,
    runtime::Runtime,
    template::{CompositeTemplateManifest, extract_manifests},
};

use super::config::{Config, ConfigOptions};

/// List templates from every built-in and installed package
#[tracing::instrument(skip(runtime, options))]
pub fn templates<R: Runtime>(runtime: R, options: ConfigOptions) -> Result<()> {
    let config = Config::new(runtime, options)?;
    let service = config.into_service(Arc::new(CatalogCache::new()));

    print_templates(&service.get_templates()?);
    Ok(())
}

/// List templates in a single package archive
#[tracing::instrument(skip(runtime))]
pub fn inspect<R: Runtime>(runtime: R, archive: &Path) -> Result<()> {
    let manifests = extract_manifests(&runtime, archive, false)?;
    print_templates(&manifests);
    Ok(())
}

fn print_templates(manifests: &[CompositeTemplateManifest]) {
    if manifests.is_empty() {
        println!("No templates found.");
        return;
    }

    debug!("Found {} template(s)", manifests.len());

    for manifest in manifests {
        println!("{}", format_template(manifest));
    }
}

fn format_template(manifest: &CompositeTemplateManifest) -> String {
    let template = &manifest.template_manifest;
    let name = template
        .name
        .as_deref()
        .or(template.identity.as_deref())
        .unwrap_or("(unnamed)");

    let mut line = name.to_string();

    if let Some(short_name) = &template.short_name {
        line.push_str(&format!(" [{}]", short_name.names().join(", ")));
    }
    if let Some(language) = template.tag("language") {
        line.push_str(&format!(" {}", language));
    }

    let package = if manifest.package_name.is_empty() {
        "(unknown package)".to_string()
    } else {
        format!("{} {}", manifest.package_name, manifest.package_version)
    };
    line.push_str(&format!(" ({}", package));
    if manifest.is_built_in {
        line.push_str(", built-in");
    }
    line.push(')');

    line
}
