//! Station discovery over the autocomplete search endpoint.
//!
//! Brute-forces short prefixes against the autocomplete API, then
//! deduplicates the suggestions and groups them by country.

mod client;
mod discovery;
mod error;
mod group;

pub use client::{StationCandidate, StationClient, StationClientConfig};
pub use discovery::{
    Alphabet, AutocompleteSource, DEFAULT_ALPHABET, PrefixExpander, discover_stations,
    root_prefixes,
};
pub use error::StationError;
pub use group::{
    CountryGroup, DedupKey, assign_countries, deduplicate, derive_country, group_by_country,
    process, sort_by_value,
};
