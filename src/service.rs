//! Template package service.
//!
//! Combines the cached remote catalog with the built-in and installed
//! package archives found on disk.

use anyhow::{Result, bail};
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::{CatalogCache, CatalogProvider, CatalogRecord};
use crate::installer::TemplateInstaller;
use crate::package::{find_built_in_packages, find_package_archives, merge};
use crate::runtime::Runtime;
use crate::template::{CompositeTemplateManifest, extract_manifests};

/// Where template packages live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLocations {
    /// `<dotnet root>/templates`, one subdirectory per SDK version
    pub templates_root: PathBuf,
    /// Directory holding user-installed package archives
    pub packages_dir: PathBuf,
}

pub struct PackagesService<R: Runtime, C: CatalogProvider, I: TemplateInstaller> {
    runtime: R,
    catalog: C,
    installer: I,
    cache: Arc<CatalogCache>,
    locations: PackageLocations,
}

impl<R: Runtime, C: CatalogProvider, I: TemplateInstaller> PackagesService<R, C, I> {
    pub fn new(
        runtime: R,
        catalog: C,
        installer: I,
        cache: Arc<CatalogCache>,
        locations: PackageLocations,
    ) -> Self {
        Self {
            runtime,
            catalog,
            installer,
            cache,
            locations,
        }
    }

    /// Catalog records annotated with local installation status.
    #[tracing::instrument(skip(self))]
    pub async fn get_template_packages(&self) -> Result<Vec<CatalogRecord>> {
        let online = self.cache.get_or_fetch(&self.catalog).await?;
        let built_in = self.built_in_packages()?;
        let installed = self.installed_packages()?;

        Ok(merge(&online, &built_in, &installed))
    }

    /// Templates contained in every built-in and installed package.
    #[tracing::instrument(skip(self))]
    pub fn get_templates(&self) -> Result<Vec<CompositeTemplateManifest>> {
        let mut templates = Vec::new();

        for path in self.built_in_packages()? {
            templates.extend(extract_manifests(&self.runtime, &path, true)?);
        }
        for path in self.installed_packages()? {
            templates.extend(extract_manifests(&self.runtime, &path, false)?);
        }

        debug!("Found {} template(s) in local packages", templates.len());
        Ok(templates)
    }

    pub fn built_in_packages(&self) -> Result<Vec<PathBuf>> {
        find_built_in_packages(&self.runtime, &self.locations.templates_root)
    }

    pub fn installed_packages(&self) -> Result<Vec<PathBuf>> {
        find_package_archives(&self.runtime, &self.locations.packages_dir)
    }

    #[tracing::instrument(skip(self))]
    pub async fn install(&self, package_id: &str) -> Result<()> {
        self.installer.install(package_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn uninstall(&self, package_id: &str) -> Result<()> {
        self.installer.uninstall(package_id).await
    }

    pub async fn update(&self, package_id: &str) -> Result<()> {
        bail!(
            "Updating template packages is not supported (package {})",
            package_id
        )
    }
}
