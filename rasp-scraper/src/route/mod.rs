//! Train route results scraping.
//!
//! Fetches the mobile route results page and assembles one [`TrainModel`]
//! per listed train from three positionally aligned DOM collections. A
//! parser for the station departure board is also provided.

mod align;
mod board;
mod client;
mod dom;
mod error;
mod model;
mod parser;
mod time;

pub use align::{AlignmentPolicy, attach};
pub use board::parse_departure_board;
pub use client::{RouteClient, RouteClientConfig, RouteQuery};
pub use dom::{collapse_whitespace, element_text, spaced_text};
pub use error::RouteError;
pub use model::{
    PLACE_TYPE_LABELS, PlaceInformation, PlaceType, TRAIN_ADVANTAGE_LABELS, TrainAdvantage,
    TrainModel,
};
pub use parser::{
    extract_advantages, extract_places, extract_trains, parse_place_row, parse_route_page,
};
pub use time::{parse_schedule_time, parse_time_pair};
