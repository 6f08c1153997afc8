//! Search session: fetch-or-refilter decision over consecutive requests
//!
//! A session remembers exactly one step of history: the remote parameters of
//! the previous request and the result set they fetched. When only local
//! filters change between requests, the session re-filters that set in
//! memory instead of calling the upstream again.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::data::HotelOffer;
use crate::inventory::InventoryError;
use crate::search::filters::apply_local_filters;
use crate::search::params::{needs_refetch, RemoteParams, SearchParams};

/// Errors that can occur when running a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// The upstream fetch failed; surfaced to the user as "search failed"
    #[error("search failed: {0}")]
    Upstream(#[from] InventoryError),
}

/// Source of hotel offers for a given set of remote parameters
///
/// The session only sees this seam, so it can be driven by the real
/// inventory client, the cache-wrapped client, or a test double.
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Fetches the offers the given remote parameters describe
    async fn fetch_offers(&self, remote: &RemoteParams)
        -> Result<Vec<HotelOffer>, InventoryError>;
}

/// The result set held from the previous request
#[derive(Debug)]
struct FetchedSet {
    remote: RemoteParams,
    offers: Vec<HotelOffer>,
}

/// Per-session search state
///
/// Two states: cold (no prior fetch) and fresh (last remote params known,
/// fetched set held). A cold session always fetches; a fresh one fetches
/// only when the remote parameter subset changed. There is no transition
/// back to cold short of dropping the session. A failed fetch propagates
/// the error and leaves the previous state intact.
#[derive(Debug, Default)]
pub struct SearchSession {
    last: Option<FetchedSet>,
}

/// Result of one search request, with the fetch decision made observable
#[derive(Debug)]
pub struct SearchOutcome {
    /// Offers satisfying the request's local filters, in upstream order
    pub offers: Vec<HotelOffer>,
    /// Whether this request went to the offer source
    pub refetched: bool,
}

impl SearchSession {
    /// Creates a session with no fetch history
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the session has no prior fetch
    pub fn is_cold(&self) -> bool {
        self.last.is_none()
    }

    /// Runs one search request against the session
    ///
    /// Classifies the parameters, diffs the remote subset against the
    /// previous request, fetches from `source` only on a mismatch (or on a
    /// cold session), then applies the local filters to the held set.
    ///
    /// # Arguments
    /// * `params` - The complete request
    /// * `source` - Where offers come from on a refetch
    ///
    /// # Returns
    /// * `Ok(SearchOutcome)` with the filtered offers
    /// * `Err(SearchError)` if the upstream fetch failed
    pub async fn search<S: OfferSource + ?Sized>(
        &mut self,
        params: &SearchParams,
        source: &S,
    ) -> Result<SearchOutcome, SearchError> {
        let (remote, local) = params.classify();

        if let Some(set) = &self.last {
            if !needs_refetch(&set.remote, &remote) {
                debug!(city = %remote.city_code, "remote params unchanged; re-filtering held set");
                let offers = apply_local_filters(&set.offers, &local);
                return Ok(SearchOutcome {
                    offers,
                    refetched: false,
                });
            }
        }

        debug!(city = %remote.city_code, "remote params changed or session cold; fetching");
        let fetched = source.fetch_offers(&remote).await?;
        let offers = apply_local_filters(&fetched, &local);
        self.last = Some(FetchedSet {
            remote,
            offers: fetched,
        });
        Ok(SearchOutcome {
            offers,
            refetched: true,
        })
    }
}
