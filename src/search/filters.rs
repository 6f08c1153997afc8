//! Local filter predicates evaluated against an already-fetched result set
//!
//! Each present filter is a predicate over a `HotelOffer`; an offer survives
//! only if it satisfies every present predicate (logical AND). Flag filters
//! (cancellation, refundability) are three-valued: an offer whose attribute
//! the upstream did not report evaluates to `Unknown` rather than a guessed
//! boolean, and the caller decides whether `Unknown` passes.

use std::collections::BTreeSet;

use crate::data::{HotelOffer, RoomType};

/// Three-valued answer for a flag attribute of an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The attribute is present and true
    Yes,
    /// The attribute is present and false
    No,
    /// The upstream did not report the attribute
    Unknown,
}

impl Verdict {
    /// Derives a verdict from an optional attribute
    pub fn from_attr(attr: Option<bool>) -> Self {
        match attr {
            Some(true) => Verdict::Yes,
            Some(false) => Verdict::No,
            None => Verdict::Unknown,
        }
    }

    /// Whether this verdict satisfies a filter asking for `wanted`
    ///
    /// `Unknown` satisfies the filter only when the caller opted in via
    /// `unknown_passes`.
    pub fn satisfies(self, wanted: bool, unknown_passes: bool) -> bool {
        match self {
            Verdict::Yes => wanted,
            Verdict::No => !wanted,
            Verdict::Unknown => unknown_passes,
        }
    }
}

/// The local filter group: predicates applied to the last fetched set
///
/// `None` means the filter is absent and constrains nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalFilters {
    /// Inclusive lower bound on total price
    pub price_min: Option<f64>,
    /// Inclusive upper bound on total price
    pub price_max: Option<f64>,
    /// Accepted star ratings; an offer without a rating never matches
    pub stars: Option<BTreeSet<u8>>,
    /// Accepted room categories; an offer without one never matches
    pub room_types: Option<BTreeSet<RoomType>>,
    /// Minimum number of beds
    pub min_beds: Option<u32>,
    /// Minimum number of bedrooms
    pub min_bedrooms: Option<u32>,
    /// Minimum number of bathrooms
    pub min_bathrooms: Option<u32>,
    /// Required free-cancellation flag
    pub free_cancellation: Option<bool>,
    /// Required refundability flag
    pub refundable: Option<bool>,
    /// Whether `Unknown` flag verdicts satisfy the flag filters
    pub unknown_passes: bool,
}

impl LocalFilters {
    /// Whether a single offer satisfies every present predicate
    pub fn matches(&self, offer: &HotelOffer) -> bool {
        if let Some(min) = self.price_min {
            if offer.price_total < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if offer.price_total > max {
                return false;
            }
        }
        if let Some(ref stars) = self.stars {
            match offer.star_rating {
                Some(rating) if stars.contains(&rating) => {}
                _ => return false,
            }
        }
        if let Some(ref room_types) = self.room_types {
            match offer.room_type {
                Some(rt) if room_types.contains(&rt) => {}
                _ => return false,
            }
        }
        if !meets_minimum(offer.beds, self.min_beds)
            || !meets_minimum(offer.bedrooms, self.min_bedrooms)
            || !meets_minimum(offer.bathrooms, self.min_bathrooms)
        {
            return false;
        }
        if let Some(wanted) = self.free_cancellation {
            if !Verdict::from_attr(offer.free_cancellation).satisfies(wanted, self.unknown_passes) {
                return false;
            }
        }
        if let Some(wanted) = self.refundable {
            if !Verdict::from_attr(offer.refundable).satisfies(wanted, self.unknown_passes) {
                return false;
            }
        }
        true
    }
}

/// Minimum-threshold predicate for count attributes
///
/// An offer that does not report the count fails any present minimum.
fn meets_minimum(value: Option<u32>, minimum: Option<u32>) -> bool {
    match minimum {
        None => true,
        Some(min) => value.is_some_and(|v| v >= min),
    }
}

/// Returns the subsequence of `offers` satisfying every present filter
///
/// Order is preserved; offers are returned as given by the upstream.
pub fn apply_local_filters(offers: &[HotelOffer], filters: &LocalFilters) -> Vec<HotelOffer> {
    offers
        .iter()
        .filter(|offer| filters.matches(offer))
        .cloned()
        .collect()
}
