//! Upstream inventory access
//!
//! The raw API client lives in `hotels`; `cached` composes it with the
//! persistent result store into the cache-aside read path.

mod cached;
mod hotels;

pub use cached::CachedInventory;
pub use hotels::{InventoryClient, InventoryError};
