//! Scrapers for the Belarusian Railway schedule website.
//!
//! Two independent pipelines: station discovery through the autocomplete
//! search endpoint, and train extraction from route results pages.

pub mod route;
pub mod settings;
pub mod sink;
pub mod stations;

/// Base URL of the production schedule website.
pub const DEFAULT_BASE_URL: &str = "https://rasp.rw.by";
