//! Search pipeline: parameter classification, local filtering, and the
//! fetch-or-refilter session
//!
//! Search parameters are split into a remote group (a change forces a new
//! upstream fetch) and a local group (a change re-filters the last fetched
//! set in memory). The split is static and known ahead of time.

pub mod filters;
pub mod params;
pub mod session;

pub use filters::{apply_local_filters, LocalFilters, Verdict};
pub use params::{needs_refetch, RemoteParams, SearchParams};
pub use session::{OfferSource, SearchError, SearchOutcome, SearchSession};
