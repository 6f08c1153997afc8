//! Cache-aside composition over an offer source
//!
//! `CachedInventory` wraps any `OfferSource` with the persistent result
//! store: read the cache, fall back to the source on a miss, then populate
//! the cache with the fetched result. Cache write failures degrade to
//! "no cache" and never abort the response.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::ResultStore;
use crate::data::HotelOffer;
use crate::inventory::InventoryError;
use crate::search::{OfferSource, RemoteParams};

/// An offer source with a persistent result cache in front of it
#[derive(Debug)]
pub struct CachedInventory<S> {
    source: S,
    store: Option<ResultStore>,
    /// When set, the cache read is skipped (the fetched result is still
    /// written back)
    refresh: bool,
}

impl<S: OfferSource> CachedInventory<S> {
    /// Wraps `source` with the given store
    ///
    /// `store` is optional so callers without a usable cache directory can
    /// still search; they simply hit the source every time.
    pub fn new(source: S, store: Option<ResultStore>, refresh: bool) -> Self {
        Self {
            source,
            store,
            refresh,
        }
    }

    /// The composed read path: cache get → miss → fetch → cache put → return
    ///
    /// # Arguments
    /// * `remote` - The remote parameters identifying the result set
    ///
    /// # Returns
    /// * `Ok(Vec<HotelOffer>)` from the cache or the source
    /// * `Err(InventoryError)` only if the source fetch failed; cache I/O
    ///   problems never surface as errors here
    pub async fn fetch_with_cache(
        &self,
        remote: &RemoteParams,
    ) -> Result<Vec<HotelOffer>, InventoryError> {
        let key = remote.cache_key();

        if !self.refresh {
            if let Some(ref store) = self.store {
                if let Some(records) = store.get::<Vec<HotelOffer>>(&key) {
                    debug!(key, count = records.len(), "serving offers from cache");
                    return Ok(records);
                }
            }
        }

        let records = self.source.fetch_offers(remote).await?;

        if let Some(ref store) = self.store {
            if let Err(e) = store.put(&key, &records) {
                warn!(key, error = %e, "cache write failed; continuing without cache");
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl<S: OfferSource> OfferSource for CachedInventory<S> {
    async fn fetch_offers(
        &self,
        remote: &RemoteParams,
    ) -> Result<Vec<HotelOffer>, InventoryError> {
        self.fetch_with_cache(remote).await
    }
}
