//! Cache module for storing upstream search results to disk
//!
//! This module provides a result store that persists upstream API responses
//! to the filesystem with a fixed TTL. Expired and corrupted entries are
//! discarded lazily on read, so callers see a plain hit-or-miss interface
//! and fall back to the upstream source on a miss.

mod store;

pub use store::ResultStore;
