//! Hotel-offers inventory API client
//!
//! This module fetches hotel offers from the upstream travel-inventory API
//! and parses its JSON envelope into our `HotelOffer` records. Prices arrive
//! as decimal strings and ratings as string digits; both are normalized
//! here. Attributes the upstream omits stay `None` rather than being
//! guessed.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::data::{HotelOffer, RoomType};
use crate::search::{OfferSource, RemoteParams};

/// Base URL for the hotel-offers endpoint
const INVENTORY_BASE_URL: &str = "https://test.api.amadeus.com/v3/shopping/hotel-offers";

/// Errors that can occur when fetching hotel offers
#[derive(Debug, Error)]
pub enum InventoryError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The upstream answered with a non-success status
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    /// Price field could not be parsed as a decimal
    #[error("Invalid price in response: {0}")]
    InvalidPrice(String),

    /// The upstream returned no usable offers
    #[error("No data available for the requested search")]
    NoDataAvailable,
}

/// Client for fetching hotel offers from the inventory API
///
/// OAuth token exchange happens outside this client; it accepts an optional
/// pre-obtained bearer token.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl InventoryClient {
    /// Creates a new client against the default endpoint
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: INVENTORY_BASE_URL.to_string(),
            bearer_token,
        }
    }

    /// Overrides the endpoint base URL (tests, alternative deployments)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches hotel offers for the given remote parameters
    ///
    /// # Arguments
    /// * `remote` - City code, date range, party size, and result limit
    ///
    /// # Returns
    /// * `Ok(Vec<HotelOffer>)` - the offers, in upstream order
    /// * `Err(InventoryError)` - if the request or parsing fails
    pub async fn fetch_offers(
        &self,
        remote: &RemoteParams,
    ) -> Result<Vec<HotelOffer>, InventoryError> {
        let mut request = self.client.get(&self.base_url).query(&[
            ("cityCode", remote.city_code.as_str()),
            ("checkInDate", &remote.check_in.to_string()),
            ("checkOutDate", &remote.check_out.to_string()),
            ("adults", &remote.adults.to_string()),
            ("pageLimit", &remote.limit.to_string()),
        ]);
        if let Some(ref token) = self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InventoryError::UpstreamStatus(status.as_u16()));
        }

        let text = response.text().await?;
        let api_response: ApiResponse = serde_json::from_str(&text)?;

        parse_response(api_response)
    }
}

#[async_trait]
impl OfferSource for InventoryClient {
    async fn fetch_offers(
        &self,
        remote: &RemoteParams,
    ) -> Result<Vec<HotelOffer>, InventoryError> {
        InventoryClient::fetch_offers(self, remote).await
    }
}

/// Maps the API envelope into `HotelOffer` records
///
/// One record per hotel, taken from its first listed offer. An empty
/// envelope is reported as `NoDataAvailable`.
fn parse_response(response: ApiResponse) -> Result<Vec<HotelOffer>, InventoryError> {
    if response.data.is_empty() {
        return Err(InventoryError::NoDataAvailable);
    }

    let fetched_at = Utc::now();
    let mut offers = Vec::with_capacity(response.data.len());

    for entry in response.data {
        let Some(first) = entry.offers.into_iter().next() else {
            // A hotel listed without offers carries nothing to show
            continue;
        };

        let price_total = first
            .price
            .total
            .parse::<f64>()
            .map_err(|_| InventoryError::InvalidPrice(first.price.total.clone()))?;

        let room_estimate = first.room.and_then(|r| r.type_estimated);
        let (room_type, beds, bedrooms, bathrooms) = match room_estimate {
            Some(est) => (
                est.category.as_deref().and_then(RoomType::from_str),
                est.beds,
                est.bedrooms,
                est.bathrooms,
            ),
            None => (None, None, None, None),
        };

        let (free_cancellation, refundable) = match first.policies {
            Some(policies) => (
                free_cancellation_from_policies(policies.cancellations.as_deref()),
                refundable_from_policies(policies.refundable.as_ref()),
            ),
            None => (None, None),
        };

        offers.push(HotelOffer {
            id: entry.hotel.hotel_id,
            name: entry.hotel.name,
            city_code: entry.hotel.city_code,
            price_total,
            currency: first.price.currency,
            star_rating: entry.hotel.rating.as_deref().and_then(|r| r.parse().ok()),
            room_type,
            beds,
            bedrooms,
            bathrooms,
            free_cancellation,
            refundable,
            latitude: entry.hotel.latitude,
            longitude: entry.hotel.longitude,
            fetched_at,
        });
    }

    if offers.is_empty() {
        return Err(InventoryError::NoDataAvailable);
    }

    Ok(offers)
}

/// Derives the free-cancellation attribute from the cancellation policy list
///
/// A policy entry with a zero fee means the stay can be cancelled for free.
/// No policy list at all means the attribute is unknown, never a guess.
fn free_cancellation_from_policies(cancellations: Option<&[ApiCancellation]>) -> Option<bool> {
    let cancellations = cancellations?;
    if cancellations.is_empty() {
        return None;
    }
    let free = cancellations.iter().any(|c| {
        c.amount
            .as_deref()
            .and_then(|a| a.parse::<f64>().ok())
            .is_some_and(|fee| fee == 0.0)
    });
    Some(free)
}

/// Derives the refundability attribute from the refund policy field
fn refundable_from_policies(refundable: Option<&ApiRefundPolicy>) -> Option<bool> {
    match refundable?.cancellation_refund.as_deref() {
        Some("REFUNDABLE_UP_TO_DEADLINE") => Some(true),
        Some("NON_REFUNDABLE") => Some(false),
        _ => None,
    }
}

/// Inventory API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse {
    data: Vec<ApiHotelEntry>,
}

/// One hotel with its offers
#[derive(Debug, Deserialize)]
struct ApiHotelEntry {
    hotel: ApiHotel,
    #[serde(default)]
    offers: Vec<ApiOffer>,
}

/// Hotel identity block
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiHotel {
    hotel_id: String,
    name: String,
    city_code: String,
    rating: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// A single bookable offer for a hotel
#[derive(Debug, Deserialize)]
struct ApiOffer {
    price: ApiPrice,
    room: Option<ApiRoom>,
    policies: Option<ApiPolicies>,
}

/// Price block; totals arrive as decimal strings
#[derive(Debug, Deserialize)]
struct ApiPrice {
    total: String,
    currency: String,
}

/// Room block
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoom {
    type_estimated: Option<ApiRoomEstimate>,
}

/// Estimated room attributes; every field may be absent
#[derive(Debug, Deserialize)]
struct ApiRoomEstimate {
    category: Option<String>,
    beds: Option<u32>,
    bedrooms: Option<u32>,
    bathrooms: Option<u32>,
}

/// Policy block
#[derive(Debug, Deserialize)]
struct ApiPolicies {
    cancellations: Option<Vec<ApiCancellation>>,
    refundable: Option<ApiRefundPolicy>,
}

/// One cancellation policy entry
#[derive(Debug, Deserialize)]
struct ApiCancellation {
    amount: Option<String>,
}

/// Refund policy entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRefundPolicy {
    cancellation_refund: Option<String>,
}
