//! Station departure board extraction.

use scraper::Html;

use super::dom::{SELECTORS, collapse_whitespace, element_text, first_text};
use super::model::TrainModel;

/// Parse the trains listed on a station board page.
///
/// Platform and track are read only when the info block has exactly two
/// markers; a marker that is not a number leaves its field unset.
pub fn parse_departure_board(html: &str) -> Vec<TrainModel> {
    let document = Html::parse_document(html);

    document
        .select(&SELECTORS.board_item)
        .map(|item| {
            let info: Vec<String> = item
                .select(&SELECTORS.board_info)
                .map(|marker| collapse_whitespace(&element_text(marker)))
                .collect();

            let (platform, way) = match info.as_slice() {
                [platform, way] => (platform.parse().ok(), way.parse().ok()),
                _ => (None, None),
            };

            TrainModel {
                title: first_text(item, &SELECTORS.board_name),
                train_type: first_text(item, &SELECTORS.board_type),
                numeration: first_text(item, &SELECTORS.board_number),
                platform,
                way,
                ..Default::default()
            }
        })
        .collect()
}
