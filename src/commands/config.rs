use anyhow::Result;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    catalog::{CatalogCache, CatalogProvider, NuGetCatalog},
    installer::{DotnetCli, TemplateInstaller},
    runtime::Runtime,
    service::{PackageLocations, PackagesService},
};

use super::paths::resolve_locations;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub catalog_url: Option<String>,
    pub dotnet_root: Option<PathBuf>,
    pub packages_dir: Option<PathBuf>,
}

pub struct Config<R: Runtime, C: CatalogProvider, I: TemplateInstaller> {
    pub runtime: R,
    pub catalog: C,
    pub installer: I,
    pub locations: PackageLocations,
}

impl<R: Runtime> Config<R, NuGetCatalog, DotnetCli> {
    pub fn new(runtime: R, options: ConfigOptions) -> Result<Self> {
        let client = Client::builder().user_agent("tplpkg-cli").build()?;
        let catalog = NuGetCatalog::new(client, options.catalog_url);
        let locations = resolve_locations(&runtime, options.dotnet_root, options.packages_dir)?;

        Ok(Self {
            runtime,
            catalog,
            installer: DotnetCli::default(),
            locations,
        })
    }
}

impl<R: Runtime, C: CatalogProvider, I: TemplateInstaller> Config<R, C, I> {
    pub fn into_service(self, cache: Arc<CatalogCache>) -> PackagesService<R, C, I> {
        PackagesService::new(
            self.runtime,
            self.catalog,
            self.installer,
            cache,
            self.locations,
        )
    }
}
