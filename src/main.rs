//! Stayscout - search hotel stays with a local result cache
//!
//! Parses the CLI arguments, runs one search session per requested city
//! (fanned out concurrently), and prints the filtered offers as a plain
//! table or JSON.

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use stayscout::cache::ResultStore;
use stayscout::cli::{build_search_params, Cli};
use stayscout::data::{all_cities, HotelOffer};
use stayscout::inventory::{CachedInventory, InventoryClient};
use stayscout::search::SearchSession;

/// Renders one city's offers as a plain-text table
fn print_city_table(city: &str, offers: &[HotelOffer]) {
    println!("{}: {} offer(s)", city, offers.len());
    for offer in offers {
        let stars = offer
            .star_rating
            .map(|s| format!("{}*", s))
            .unwrap_or_else(|| "-".to_string());
        let room = offer.room_type.map(|r| r.as_str()).unwrap_or("-");
        println!(
            "  {:<12} {:<34} {:>3} {:<10} {:>10.2} {}  {} {}",
            offer.id,
            offer.name,
            stars,
            room,
            offer.price_total,
            offer.currency,
            flag_text("free-cancel", offer.free_cancellation),
            flag_text("refundable", offer.refundable),
        );
    }
}

/// Short display form for a tri-state flag attribute
///
/// An unknown attribute is shown with a trailing `?` rather than being
/// presented as a definite yes or no.
fn flag_text(name: &str, attr: Option<bool>) -> String {
    match attr {
        Some(true) => name.to_string(),
        Some(false) => format!("no-{}", name),
        None => format!("{}?", name),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_cities {
        for city in all_cities() {
            println!("{}  {} ({})", city.code, city.name, city.country);
        }
        return Ok(());
    }

    if cli.clear_cache {
        let Some(store) = ResultStore::new() else {
            return Err("cache directory unavailable".into());
        };
        let removed = store.delete_all()?;
        println!("Removed {} cached result set(s)", removed);
        return Ok(());
    }

    let params_list = build_search_params(&cli)?;

    let store = ResultStore::new();
    if store.is_none() {
        warn!("cache directory unavailable; searching without a cache");
    }
    let token = std::env::var("STAYSCOUT_API_TOKEN").ok();
    let client = InventoryClient::new(token);
    let source = CachedInventory::new(client, store, cli.refresh);

    // One independent session per city, fanned out concurrently
    let searches = params_list.iter().map(|params| {
        let source = &source;
        async move {
            let mut session = SearchSession::new();
            let result = session.search(params, source).await;
            (params.city_code.clone(), result)
        }
    });
    let results = futures::future::join_all(searches).await;

    let mut failed = false;

    if cli.json {
        let mut out = Vec::new();
        for (city, result) in &results {
            match result {
                Ok(outcome) => {
                    out.push(serde_json::json!({ "city": city, "offers": outcome.offers }));
                }
                Err(e) => {
                    failed = true;
                    eprintln!("{}: {}", city, e);
                }
            }
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (city, result) in &results {
            match result {
                Ok(outcome) => print_city_table(city, &outcome.offers),
                Err(e) => {
                    failed = true;
                    eprintln!("{}: {}", city, e);
                }
            }
        }
    }

    if failed {
        return Err("one or more searches failed".into());
    }
    Ok(())
}
