//! Search parameters and the remote/local split
//!
//! Every search parameter belongs to exactly one of two fixed groups:
//! "remote" parameters change what the upstream is asked for, so a change
//! forces a new fetch; "local" parameters only narrow an already-fetched
//! result set, so a change is satisfied by re-filtering in memory. The
//! partition is static; there is no dynamic reclassification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::data::RoomType;
use crate::search::filters::LocalFilters;

/// The subset of parameters that determines what the upstream is asked for
///
/// Two requests with equal `RemoteParams` can share one fetched result set.
/// Equality is structural, so the comparison is independent of the order in
/// which the parameters were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteParams {
    /// IATA city code to search in
    pub city_code: String,
    /// Check-in date
    pub check_in: NaiveDate,
    /// Check-out date
    pub check_out: NaiveDate,
    /// Number of adult guests
    pub adults: u8,
    /// Maximum number of offers to request
    pub limit: u32,
}

impl RemoteParams {
    /// Cache key for the result set these parameters fetch
    ///
    /// Keyed by city and limit only: the persistent cache memoizes the
    /// city's inventory listing, which changes slowly relative to the TTL.
    pub fn cache_key(&self) -> String {
        format!("hotels_{}_{}", self.city_code, self.limit)
    }
}

/// A complete search request: remote parameters plus local filters, flat
///
/// This is the shape the CLI produces. `classify` partitions it into the
/// two fixed groups.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    // Remote group
    pub city_code: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u8,
    pub limit: u32,
    // Local group
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub stars: Option<BTreeSet<u8>>,
    pub room_types: Option<BTreeSet<RoomType>>,
    pub min_beds: Option<u32>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
    pub free_cancellation: Option<bool>,
    pub refundable: Option<bool>,
    /// Whether an offer with an unknown flag attribute satisfies a flag filter
    pub unknown_passes: bool,
}

impl SearchParams {
    /// Partitions the request into its remote and local groups
    pub fn classify(&self) -> (RemoteParams, LocalFilters) {
        let remote = RemoteParams {
            city_code: self.city_code.clone(),
            check_in: self.check_in,
            check_out: self.check_out,
            adults: self.adults,
            limit: self.limit,
        };
        let local = LocalFilters {
            price_min: self.price_min,
            price_max: self.price_max,
            stars: self.stars.clone(),
            room_types: self.room_types.clone(),
            min_beds: self.min_beds,
            min_bedrooms: self.min_bedrooms,
            min_bathrooms: self.min_bathrooms,
            free_cancellation: self.free_cancellation,
            refundable: self.refundable,
            unknown_passes: self.unknown_passes,
        };
        (remote, local)
    }
}

/// Returns true iff the remote parameter subset changed between two
/// consecutive requests, forcing a new upstream fetch
pub fn needs_refetch(prev: &RemoteParams, curr: &RemoteParams) -> bool {
    prev != curr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> SearchParams {
        SearchParams {
            city_code: "NYC".to_string(),
            check_in: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
            adults: 2,
            limit: 16,
            price_min: None,
            price_max: None,
            stars: None,
            room_types: None,
            min_beds: None,
            min_bedrooms: None,
            min_bathrooms: None,
            free_cancellation: None,
            refundable: None,
            unknown_passes: false,
        }
    }

    #[test]
    fn test_classify_partitions_remote_and_local() {
        let mut params = sample_params();
        params.price_max = Some(300.0);
        params.min_beds = Some(2);

        let (remote, local) = params.classify();

        assert_eq!(remote.city_code, "NYC");
        assert_eq!(remote.adults, 2);
        assert_eq!(remote.limit, 16);
        assert_eq!(local.price_max, Some(300.0));
        assert_eq!(local.min_beds, Some(2));
        assert_eq!(local.price_min, None);
    }

    #[test]
    fn test_needs_refetch_false_for_identical_remote_params() {
        let (a, _) = sample_params().classify();
        let (b, _) = sample_params().classify();
        assert!(!needs_refetch(&a, &b));
    }

    #[test]
    fn test_needs_refetch_ignores_local_changes() {
        let first = sample_params();
        let mut second = sample_params();
        second.price_max = Some(200.0);
        second.free_cancellation = Some(true);

        let (prev, _) = first.classify();
        let (curr, _) = second.classify();

        assert!(!needs_refetch(&prev, &curr));
    }

    #[test]
    fn test_needs_refetch_true_when_city_changes() {
        let first = sample_params();
        let mut second = sample_params();
        second.city_code = "PAR".to_string();

        let (prev, _) = first.classify();
        let (curr, _) = second.classify();

        assert!(needs_refetch(&prev, &curr));
    }

    #[test]
    fn test_needs_refetch_true_when_dates_change() {
        let first = sample_params();
        let mut second = sample_params();
        second.check_out = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();

        let (prev, _) = first.classify();
        let (curr, _) = second.classify();

        assert!(needs_refetch(&prev, &curr));
    }

    #[test]
    fn test_cache_key_composed_of_city_and_limit() {
        let (remote, _) = sample_params().classify();
        assert_eq!(remote.cache_key(), "hotels_NYC_16");
    }
}
