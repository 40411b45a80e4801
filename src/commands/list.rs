use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::{
    catalog::{CatalogCache, CatalogProvider, CatalogRecord},
    installer::TemplateInstaller,
    runtime::Runtime,
    service::PackagesService,
};

use super::config::{Config, ConfigOptions};

/// List catalog packages with their local installation status
#[tracing::instrument(skip(runtime, options))]
pub async fn list<R: Runtime>(runtime: R, options: ConfigOptions) -> Result<()> {
    let config = Config::new(runtime, options)?;
    let service = config.into_service(Arc::new(CatalogCache::new()));
    run_list(&service).await
}

pub async fn run_list<R: Runtime, C: CatalogProvider, I: TemplateInstaller>(
    service: &PackagesService<R, C, I>,
) -> Result<()> {
    let packages = service.get_template_packages().await?;
    if packages.is_empty() {
        println!("No template packages found.");
        return Ok(());
    }

    debug!("Found {} package(s)", packages.len());

    for record in &packages {
        println!("{}", format_record(record));
    }

    Ok(())
}

fn format_record(record: &CatalogRecord) -> String {
    let version = if record.version.is_empty() {
        "(unknown)"
    } else {
        record.version.as_str()
    };
    let mut line = format!("{} {}", record.id, version);

    if record.is_installed {
        let installed = record.installed_version.as_deref().unwrap_or("(unknown)");
        if record.is_built_in {
            line.push_str(&format!(" [built-in {}]", installed));
        } else {
            line.push_str(&format!(" [installed {}]", installed));
        }
    }

    line
}
