use anyhow::Result;
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::OnceCell;

use super::{CatalogProvider, CatalogRecord};

type Slot = OnceCell<Arc<Vec<CatalogRecord>>>;

/// Single-flight memo for the remote catalog.
///
/// The first caller runs the fetch; callers arriving while it is in flight
/// wait for the same result, and later callers get the stored value. A failed
/// fetch stores nothing, so the next caller fetches again.
///
/// The cache is meant to be shared as `Arc<CatalogCache>`. [`reset`](Self::reset)
/// swaps in an empty slot, so fetches already in flight finish into the old
/// one and only later callers fetch again.
#[derive(Debug, Default)]
pub struct CatalogCache {
    slot: RwLock<Arc<Slot>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&self) -> Arc<Slot> {
        Arc::clone(&self.slot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Return the cached catalog, fetching it from `provider` on first use.
    #[tracing::instrument(skip(self, provider))]
    pub async fn get_or_fetch<C: CatalogProvider + ?Sized>(
        &self,
        provider: &C,
    ) -> Result<Arc<Vec<CatalogRecord>>> {
        let slot = self.current();
        let records = slot
            .get_or_try_init(|| async {
                debug!("Fetching remote template catalog...");
                let records = provider.fetch_templates().await?;
                debug!("Fetched {} catalog record(s)", records.len());
                Ok::<_, anyhow::Error>(Arc::new(records))
            })
            .await?;

        Ok(Arc::clone(records))
    }

    /// The cached catalog, if a fetch has completed.
    pub fn get(&self) -> Option<Arc<Vec<CatalogRecord>>> {
        self.current().get().cloned()
    }

    /// Forget the cached catalog.
    pub fn reset(&self) {
        debug!("Resetting template catalog cache");
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(Slot::new());
    }
}
