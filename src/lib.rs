//! Stayscout Library
//!
//! Hotel-stay search over an upstream travel-inventory API, with a
//! file-backed result cache and a remote/local split of search filters.

pub mod cache;
pub mod cli;
pub mod data;
pub mod inventory;
pub mod search;
