//! Core business logic: rate table, cache and conversion

pub mod cache;
pub mod config;
pub mod convert;
pub mod currency;
pub mod log;
pub mod request;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use convert::{ConversionError, convert};
pub use currency::{RateFeed, RateSnapshot, RateTable, normalize_symbol};
pub use request::{Envelope, RawRequest, respond};
