//! Remote template catalog.
//!
//! The catalog lists template packages available for installation. It is
//! fetched from a NuGet search endpoint and memoized for the lifetime of the
//! process by [`CatalogCache`].

mod cache;
mod nuget;
pub mod retry;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use cache::CatalogCache;
pub use nuget::{DEFAULT_CATALOG_URL, NuGetCatalog};

/// A template package as listed by the remote catalog, annotated with local
/// installation status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// Package identifier, also what install/uninstall take.
    pub id: String,
    /// Latest version published to the catalog
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub total_downloads: u64,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub verified: bool,

    // Status fields, filled in by reconciliation
    #[serde(default)]
    pub is_installed: bool,
    #[serde(default)]
    pub installed_version: Option<String>,
    #[serde(default)]
    pub is_built_in: bool,
}

/// Trait for remote catalog providers.
///
/// Fetching may be slow; callers are expected to go through [`CatalogCache`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch every template package currently listed.
    async fn fetch_templates(&self) -> Result<Vec<CatalogRecord>>;
}
