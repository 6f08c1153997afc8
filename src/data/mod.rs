//! Core data models for Stayscout
//!
//! This module contains the data types used throughout the application
//! for representing cities, hotel offers, and room categories.

pub mod city;

pub use city::{all_cities, get_city_by_code};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A searchable city in the static registry
///
/// Uses `&'static str` for string fields to allow static initialization
/// of the CITIES array. Only implements `Serialize` because the static
/// string references cannot be safely deserialized; use `get_city_by_code`
/// to look up cities from deserialized city codes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct City {
    /// IATA city code used by the upstream inventory API
    pub code: &'static str,
    /// Human-readable city name
    pub name: &'static str,
    /// Country the city is in
    pub country: &'static str,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

/// A single hotel offer returned by the upstream inventory API
///
/// This is the record the cache stores and the local filters evaluate.
/// Attribute fields the upstream may omit are `Option`: `None` means the
/// attribute is unknown, not false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    /// Upstream identifier for the property
    pub id: String,
    /// Hotel name
    pub name: String,
    /// IATA city code the offer belongs to
    pub city_code: String,
    /// Total price for the stay
    pub price_total: f64,
    /// ISO 4217 currency code for the price
    pub currency: String,
    /// Star rating (1-5), if the upstream reports one
    pub star_rating: Option<u8>,
    /// Room category, if the upstream reports one
    pub room_type: Option<RoomType>,
    /// Number of beds, if reported
    pub beds: Option<u32>,
    /// Number of bedrooms, if reported
    pub bedrooms: Option<u32>,
    /// Number of bathrooms, if reported
    pub bathrooms: Option<u32>,
    /// Whether the offer can be cancelled free of charge; `None` = unknown
    pub free_cancellation: Option<bool>,
    /// Whether the offer is refundable; `None` = unknown
    pub refundable: Option<bool>,
    /// Latitude of the property, if reported
    pub latitude: Option<f64>,
    /// Longitude of the property, if reported
    pub longitude: Option<f64>,
    /// When this record was fetched from the upstream
    pub fetched_at: DateTime<Utc>,
}

/// Room categories recognized by the local filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomType {
    Standard,
    Double,
    Twin,
    Suite,
    Apartment,
    Villa,
}

impl RoomType {
    /// Parses a room-type name as given on the command line or by the
    /// upstream's `typeEstimated.category` field
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "standard_room" => Some(RoomType::Standard),
            "double" | "double_room" => Some(RoomType::Double),
            "twin" | "twin_room" => Some(RoomType::Twin),
            "suite" | "junior_suite" => Some(RoomType::Suite),
            "apartment" | "residential_apartment" => Some(RoomType::Apartment),
            "villa" => Some(RoomType::Villa),
            _ => None,
        }
    }

    /// Display name for CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Double => "double",
            RoomType::Twin => "twin",
            RoomType::Suite => "suite",
            RoomType::Apartment => "apartment",
            RoomType::Villa => "villa",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_offer() -> HotelOffer {
        HotelOffer {
            id: "HLNYC123".to_string(),
            name: "Harbor View Hotel".to_string(),
            city_code: "NYC".to_string(),
            price_total: 182.50,
            currency: "USD".to_string(),
            star_rating: Some(4),
            room_type: Some(RoomType::Double),
            beds: Some(2),
            bedrooms: Some(1),
            bathrooms: Some(1),
            free_cancellation: Some(true),
            refundable: None,
            latitude: Some(40.71),
            longitude: Some(-74.00),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_hotel_offer_serialization_roundtrip() {
        let offer = sample_offer();

        let json = serde_json::to_string(&offer).expect("Failed to serialize HotelOffer");
        let deserialized: HotelOffer =
            serde_json::from_str(&json).expect("Failed to deserialize HotelOffer");

        assert_eq!(deserialized, offer);
    }

    #[test]
    fn test_unknown_attributes_stay_unknown_through_serde() {
        let mut offer = sample_offer();
        offer.free_cancellation = None;
        offer.refundable = None;

        let json = serde_json::to_string(&offer).expect("Failed to serialize");
        let deserialized: HotelOffer = serde_json::from_str(&json).expect("Failed to deserialize");

        assert!(deserialized.free_cancellation.is_none());
        assert!(deserialized.refundable.is_none());
    }

    #[test]
    fn test_room_type_from_str_aliases() {
        assert_eq!(RoomType::from_str("suite"), Some(RoomType::Suite));
        assert_eq!(RoomType::from_str("JUNIOR_SUITE"), Some(RoomType::Suite));
        assert_eq!(RoomType::from_str("double"), Some(RoomType::Double));
        assert_eq!(RoomType::from_str("DOUBLE_ROOM"), Some(RoomType::Double));
        assert_eq!(RoomType::from_str("apartment"), Some(RoomType::Apartment));
        assert_eq!(
            RoomType::from_str("RESIDENTIAL_APARTMENT"),
            Some(RoomType::Apartment)
        );
    }

    #[test]
    fn test_room_type_from_str_invalid() {
        assert_eq!(RoomType::from_str("penthouse"), None);
        assert_eq!(RoomType::from_str(""), None);
    }

    #[test]
    fn test_room_type_as_str_roundtrip() {
        let all = [
            RoomType::Standard,
            RoomType::Double,
            RoomType::Twin,
            RoomType::Suite,
            RoomType::Apartment,
            RoomType::Villa,
        ];
        for rt in all {
            assert_eq!(RoomType::from_str(rt.as_str()), Some(rt));
        }
    }
}
