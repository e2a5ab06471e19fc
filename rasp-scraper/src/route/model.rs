//! Train, seat and service-advantage models.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::dom::collapse_whitespace;

/// Seat class of a carriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceType {
    #[default]
    Undefined,
    Sedentary,
    General,
    SecondClass,
    Coupe,
    Luxury,
}

/// Labels used by the website for each seat class.
pub const PLACE_TYPE_LABELS: &[(&str, PlaceType)] = &[
    ("Сидячий", PlaceType::Sedentary),
    ("Общий", PlaceType::General),
    ("Плацкартный", PlaceType::SecondClass),
    ("Купе", PlaceType::Coupe),
    ("СВ", PlaceType::Luxury),
];

impl PlaceType {
    /// Look up a seat class by its label, falling back to `Undefined`.
    ///
    /// ```
    /// use rasp_scraper::route::PlaceType;
    ///
    /// assert_eq!(PlaceType::from_label("Купе"), PlaceType::Coupe);
    /// assert_eq!(PlaceType::from_label("Люкс"), PlaceType::Undefined);
    /// ```
    pub fn from_label(label: &str) -> Self {
        lookup(PLACE_TYPE_LABELS, label).unwrap_or(PlaceType::Undefined)
    }
}

/// Service feature shown in a train's legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainAdvantage {
    #[default]
    Undefined,
    ElectronicRegistration,
    FastTrain,
    ClassTrain,
}

/// Legend markers used by the website for each advantage.
pub const TRAIN_ADVANTAGE_LABELS: &[(&str, TrainAdvantage)] = &[
    ("ФП", TrainAdvantage::ClassTrain),
    ("ЭР", TrainAdvantage::ElectronicRegistration),
    ("СП", TrainAdvantage::FastTrain),
];

impl TrainAdvantage {
    /// Look up an advantage by its legend marker, falling back to `Undefined`.
    pub fn from_label(label: &str) -> Self {
        lookup(TRAIN_ADVANTAGE_LABELS, label).unwrap_or(TrainAdvantage::Undefined)
    }

    pub fn is_defined(&self) -> bool {
        *self != TrainAdvantage::Undefined
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], label: &str) -> Option<T> {
    let label = collapse_whitespace(label);
    table
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, value)| *value)
}

/// Seat availability for one carriage class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlaceInformation {
    #[serde(rename = "type")]
    pub place_type: PlaceType,
    /// Zero when the page shows no parseable count.
    pub available_seats: u32,
    /// Price text as shown, `None` when blank.
    pub price: Option<String>,
}

/// A train listed on a route results page or a station board.
///
/// Empty `places` / `advantages` mean the page offered nothing for them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TrainModel {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub train_type: Option<String>,
    pub numeration: Option<String>,
    pub platform: Option<u32>,
    pub way: Option<u32>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<PlaceInformation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advantages: Vec<TrainAdvantage>,
}
