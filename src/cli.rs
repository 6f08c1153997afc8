//! Command-line interface parsing for Stayscout
//!
//! This module handles parsing of CLI arguments using clap and validates
//! them into `SearchParams` before any network traffic happens: unknown
//! city codes, inverted date ranges, and empty price ranges are rejected
//! here.

use chrono::NaiveDate;
use clap::Parser;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::data::{get_city_by_code, RoomType};
use crate::search::SearchParams;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified city code is not in the registry
    #[error("Unknown city code: '{0}'. Run with --list-cities to see the available codes")]
    UnknownCity(String),

    /// A required argument is missing for a search
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Check-out is not after check-in
    #[error("Check-out date {check_out} must be after check-in date {check_in}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    /// The price range cannot match anything
    #[error("Price range is empty: min {min} exceeds max {max}")]
    EmptyPriceRange { min: f64, max: f64 },

    /// Star ratings are 1 through 5
    #[error("Invalid star rating: {0}. Ratings run from 1 to 5")]
    InvalidStarRating(u8),

    /// The specified room type is not recognized
    #[error("Invalid room type: '{0}'. Valid types: standard, double, twin, suite, apartment, villa")]
    InvalidRoomType(String),
}

/// Stayscout - search hotel stays with a local result cache
#[derive(Parser, Debug)]
#[command(name = "stayscout")]
#[command(about = "Search hotel stays from the travel-inventory API")]
#[command(version)]
pub struct Cli {
    /// City code to search in (repeatable for a multi-city search)
    ///
    /// Examples:
    ///   stayscout --city NYC --check-in 2026-09-01 --check-out 2026-09-05
    ///   stayscout --city NYC --city PAR --check-in 2026-09-01 --check-out 2026-09-05
    #[arg(long = "city", value_name = "CODE")]
    pub cities: Vec<String>,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: Option<NaiveDate>,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: Option<NaiveDate>,

    /// Number of adult guests
    #[arg(long, default_value_t = 2)]
    pub adults: u8,

    /// Maximum number of offers to request per city
    #[arg(long, default_value_t = 16)]
    pub limit: u32,

    /// Keep only offers priced at or above this amount
    #[arg(long, value_name = "AMOUNT")]
    pub price_min: Option<f64>,

    /// Keep only offers priced at or below this amount
    #[arg(long, value_name = "AMOUNT")]
    pub price_max: Option<f64>,

    /// Keep only offers with one of these star ratings (comma-separated)
    #[arg(long, value_name = "RATINGS", value_delimiter = ',')]
    pub stars: Vec<u8>,

    /// Keep only offers with one of these room types (comma-separated)
    #[arg(long = "room-type", value_name = "TYPES", value_delimiter = ',')]
    pub room_types: Vec<String>,

    /// Keep only offers with at least this many beds
    #[arg(long, value_name = "N")]
    pub min_beds: Option<u32>,

    /// Keep only offers with at least this many bedrooms
    #[arg(long, value_name = "N")]
    pub min_bedrooms: Option<u32>,

    /// Keep only offers with at least this many bathrooms
    #[arg(long, value_name = "N")]
    pub min_bathrooms: Option<u32>,

    /// Keep only offers with free cancellation
    #[arg(long)]
    pub free_cancellation: bool,

    /// Keep only refundable offers
    #[arg(long)]
    pub refundable: bool,

    /// Let offers with unknown cancellation/refund attributes pass the
    /// flag filters instead of failing them
    #[arg(long)]
    pub include_unknown: bool,

    /// Skip the cache read and fetch fresh data (the cache is still updated)
    #[arg(long)]
    pub refresh: bool,

    /// Remove every cached result set and exit
    #[arg(long)]
    pub clear_cache: bool,

    /// List the available city codes and exit
    #[arg(long)]
    pub list_cities: bool,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Validates the CLI arguments into one `SearchParams` per requested city
///
/// # Arguments
/// * `cli` - The parsed CLI struct
///
/// # Returns
/// * `Ok(Vec<SearchParams>)` in the order the cities were given
/// * `Err(CliError)` for the first validation problem found
pub fn build_search_params(cli: &Cli) -> Result<Vec<SearchParams>, CliError> {
    if cli.cities.is_empty() {
        return Err(CliError::MissingArgument("--city"));
    }
    let check_in = cli.check_in.ok_or(CliError::MissingArgument("--check-in"))?;
    let check_out = cli
        .check_out
        .ok_or(CliError::MissingArgument("--check-out"))?;

    if check_out <= check_in {
        return Err(CliError::InvalidDateRange {
            check_in,
            check_out,
        });
    }

    if let (Some(min), Some(max)) = (cli.price_min, cli.price_max) {
        if min > max {
            return Err(CliError::EmptyPriceRange { min, max });
        }
    }

    let stars = parse_stars(&cli.stars)?;
    let room_types = parse_room_types(&cli.room_types)?;

    let mut params = Vec::with_capacity(cli.cities.len());
    for code in &cli.cities {
        let city = get_city_by_code(code).ok_or_else(|| CliError::UnknownCity(code.clone()))?;

        params.push(SearchParams {
            city_code: city.code.to_string(),
            check_in,
            check_out,
            adults: cli.adults,
            limit: cli.limit,
            price_min: cli.price_min,
            price_max: cli.price_max,
            stars: stars.clone(),
            room_types: room_types.clone(),
            min_beds: cli.min_beds,
            min_bedrooms: cli.min_bedrooms,
            min_bathrooms: cli.min_bathrooms,
            free_cancellation: cli.free_cancellation.then_some(true),
            refundable: cli.refundable.then_some(true),
            unknown_passes: cli.include_unknown,
        });
    }

    Ok(params)
}

/// Validates star ratings into a set; an empty list means no filter
fn parse_stars(stars: &[u8]) -> Result<Option<BTreeSet<u8>>, CliError> {
    if stars.is_empty() {
        return Ok(None);
    }
    let mut set = BTreeSet::new();
    for &rating in stars {
        if !(1..=5).contains(&rating) {
            return Err(CliError::InvalidStarRating(rating));
        }
        set.insert(rating);
    }
    Ok(Some(set))
}

/// Parses room-type names into a set; an empty list means no filter
fn parse_room_types(names: &[String]) -> Result<Option<BTreeSet<RoomType>>, CliError> {
    if names.is_empty() {
        return Ok(None);
    }
    let mut set = BTreeSet::new();
    for name in names {
        let rt = RoomType::from_str(name).ok_or_else(|| CliError::InvalidRoomType(name.clone()))?;
        set.insert(rt);
    }
    Ok(Some(set))
}
