use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use super::retry::{into_catalog_error, with_retry};
use super::{CatalogProvider, CatalogRecord};

/// NuGet search endpoint used when no catalog URL is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://azuresearch-usnc.nuget.org/query";

const PAGE_SIZE: usize = 100;

// 10 pages (1000 packages) keeps a misbehaving endpoint from looping forever
const MAX_PAGES: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPage {
    #[serde(default)]
    total_hits: usize,
    #[serde(default)]
    data: Vec<CatalogRecord>,
}

/// Catalog backed by the NuGet search API, filtered to template packages.
pub struct NuGetCatalog {
    pub client: Client,
    pub search_url: String,
}

impl NuGetCatalog {
    #[tracing::instrument(skip(client, search_url))]
    pub fn new(client: Client, search_url: Option<String>) -> Self {
        let search_url = search_url.unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        Self { client, search_url }
    }

    #[tracing::instrument(skip(client, search_url))]
    pub async fn fetch_all(client: &Client, search_url: &str) -> Result<Vec<CatalogRecord>> {
        let mut records = Vec::new();

        for page in 0..MAX_PAGES {
            let skip = page * PAGE_SIZE;
            debug!("Fetching catalog page {} from {}...", page + 1, search_url);

            let parsed: SearchPage = with_retry("Fetching template catalog", || {
                let client = client.clone();
                let url = search_url.to_string();
                async move {
                    let response = client
                        .get(&url)
                        .query(&[
                            ("q", ""),
                            ("packageType", "Template"),
                            ("prerelease", "true"),
                            ("semVerLevel", "2.0.0"),
                            ("skip", &skip.to_string()),
                            ("take", &PAGE_SIZE.to_string()),
                        ])
                        .send()
                        .await
                        .context("Failed to send request to catalog")?;

                    let response = response.error_for_status().map_err(into_catalog_error)?;

                    response
                        .json::<SearchPage>()
                        .await
                        .context("Failed to parse catalog response")
                }
            })
            .await?;

            let received = parsed.data.len();
            records.extend(parsed.data);

            if received < PAGE_SIZE || records.len() >= parsed.total_hits {
                break;
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl CatalogProvider for NuGetCatalog {
    #[tracing::instrument(skip(self))]
    async fn fetch_templates(&self) -> Result<Vec<CatalogRecord>> {
        NuGetCatalog::fetch_all(&self.client, &self.search_url).await
    }
}
