//! Static registry of searchable cities
//!
//! The result cache is designed for a small, bounded set of query keys, so
//! the set of cities the CLI accepts is fixed here. City codes follow the
//! IATA city-code convention used by the upstream inventory API.

use super::City;

/// The fixed set of cities available for search
///
/// Keeping this list static bounds the cache key space: one entry per
/// (city, limit) pair, a handful of files at most.
static CITIES: &[City] = &[
    City {
        code: "NYC",
        name: "New York",
        country: "United States",
        latitude: 40.7128,
        longitude: -74.0060,
    },
    City {
        code: "PAR",
        name: "Paris",
        country: "France",
        latitude: 48.8566,
        longitude: 2.3522,
    },
    City {
        code: "LON",
        name: "London",
        country: "United Kingdom",
        latitude: 51.5074,
        longitude: -0.1278,
    },
    City {
        code: "ROM",
        name: "Rome",
        country: "Italy",
        latitude: 41.9028,
        longitude: 12.4964,
    },
    City {
        code: "BCN",
        name: "Barcelona",
        country: "Spain",
        latitude: 41.3874,
        longitude: 2.1686,
    },
    City {
        code: "TYO",
        name: "Tokyo",
        country: "Japan",
        latitude: 35.6762,
        longitude: 139.6503,
    },
    City {
        code: "DXB",
        name: "Dubai",
        country: "United Arab Emirates",
        latitude: 25.2048,
        longitude: 55.2708,
    },
    City {
        code: "SIN",
        name: "Singapore",
        country: "Singapore",
        latitude: 1.3521,
        longitude: 103.8198,
    },
    City {
        code: "SYD",
        name: "Sydney",
        country: "Australia",
        latitude: -33.8688,
        longitude: 151.2093,
    },
    City {
        code: "IST",
        name: "Istanbul",
        country: "Turkey",
        latitude: 41.0082,
        longitude: 28.9784,
    },
];

/// Returns all cities available for search
pub fn all_cities() -> &'static [City] {
    CITIES
}

/// Looks up a city by its IATA city code (case-insensitive)
///
/// # Arguments
/// * `code` - The city code to look up (e.g., "NYC")
///
/// # Returns
/// * `Some(&City)` if the code matches a registered city
/// * `None` otherwise
pub fn get_city_by_code(code: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}
