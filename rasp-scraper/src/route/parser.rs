//! Route results page extraction.
//!
//! Three independent passes over the document: the train list, the seat
//! tables and the advantage legends. The latter two are paired with the
//! train list by position.

use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use tracing::debug;

use super::align::{AlignmentPolicy, attach};
use super::dom::{SELECTORS, collapse_whitespace, element_text, first_text, spaced_text};
use super::error::RouteError;
use super::model::{PlaceInformation, PlaceType, TrainAdvantage, TrainModel};
use super::time::parse_time_pair;

/// Build the initial train list from the list items.
///
/// Times are set only when the item has exactly two time cells and both
/// parse; otherwise both stay unset.
pub fn extract_trains(document: &Html, date: NaiveDate) -> Vec<TrainModel> {
    document
        .select(&SELECTORS.list_item)
        .map(|item| {
            let times: Vec<String> = item.select(&SELECTORS.list_time).map(spaced_text).collect();
            let (start_time, end_time) = match times.as_slice() {
                [start, end] => match parse_time_pair(start, end, date) {
                    Some((start, end)) => (Some(start), Some(end)),
                    None => (None, None),
                },
                _ => (None, None),
            };

            TrainModel {
                title: first_text(item, &SELECTORS.list_title),
                schedule: first_text(item, &SELECTORS.list_schedule),
                start_time,
                end_time,
                ..Default::default()
            }
        })
        .collect()
}

/// Recognised advantages of each legend block, in document order.
pub fn extract_advantages(document: &Html) -> Vec<Vec<TrainAdvantage>> {
    document
        .select(&SELECTORS.legend)
        .map(|legend| {
            legend
                .select(&SELECTORS.legend_marker)
                .map(|marker| TrainAdvantage::from_label(&element_text(marker)))
                .filter(TrainAdvantage::is_defined)
                .collect()
        })
        .collect()
}

/// Parse one seat-table row; rows without exactly three cells are skipped.
pub fn parse_place_row(row: ElementRef<'_>) -> Option<PlaceInformation> {
    let cells: Vec<ElementRef<'_>> = row.select(&SELECTORS.cell).collect();
    let [kind, seats, price] = cells.as_slice() else {
        return None;
    };

    let price = collapse_whitespace(&element_text(*price));

    Some(PlaceInformation {
        place_type: PlaceType::from_label(&element_text(*kind)),
        available_seats: collapse_whitespace(&element_text(*seats))
            .parse()
            .unwrap_or(0),
        price: (!price.is_empty()).then_some(price),
    })
}

/// Parsed rows of each seat table, in document order.
pub fn extract_places(document: &Html) -> Vec<Vec<PlaceInformation>> {
    document
        .select(&SELECTORS.places_table)
        .map(|table| {
            table
                .select(&SELECTORS.row)
                .filter_map(parse_place_row)
                .collect()
        })
        .collect()
}

/// Parse a route results page into trains.
///
/// `date` is the travel date of the query, used for times printed without
/// one. Fails only when `policy` is [`AlignmentPolicy::FailFast`] and a
/// collection does not line up with the train list.
pub fn parse_route_page(
    html: &str,
    date: NaiveDate,
    policy: AlignmentPolicy,
) -> Result<Vec<TrainModel>, RouteError> {
    let document = Html::parse_document(html);

    let mut trains = extract_trains(&document, date);
    let places = extract_places(&document);
    let advantages = extract_advantages(&document);

    debug!(
        trains = trains.len(),
        places_tables = places.len(),
        legends = advantages.len(),
        "route page collections"
    );

    attach(&mut trains, "places tables", places, policy, |train, places| {
        train.places = places;
    })?;
    attach(&mut trains, "legends", advantages, policy, |train, advantages| {
        train.advantages = advantages;
    })?;

    Ok(trains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    const ROUTE_PAGE: &str = include_str!("../../data/route_minsk_brest.html");

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 8, 22).unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn rows(html: &str) -> Vec<Option<PlaceInformation>> {
        let document = Html::parse_fragment(html);
        document.select(&SELECTORS.row).map(parse_place_row).collect()
    }

    #[test]
    fn initial_list_has_titles_schedules_and_times() {
        let document = Html::parse_document(ROUTE_PAGE);
        let trains = extract_trains(&document, date());

        assert_eq!(trains.len(), 3);

        assert_eq!(
            trains[0].title.as_deref(),
            Some("Минск-Пассажирский — Брест-Центральный")
        );
        assert_eq!(trains[0].schedule.as_deref(), Some("ежедневно"));
        assert_eq!(trains[0].start_time, Some(at("2018-08-22 06:12")));
        assert_eq!(trains[0].end_time, Some(at("2018-08-22 09:34")));

        assert_eq!(trains[1].title.as_deref(), Some("Гомель — Брест-Центральный"));
        assert_eq!(trains[1].end_time, Some(at("2018-08-23 01:15")));
    }

    #[test]
    fn unparseable_times_stay_unset() {
        let document = Html::parse_document(ROUTE_PAGE);
        let trains = extract_trains(&document, date());

        assert_eq!(trains[2].start_time, None);
        assert_eq!(trains[2].end_time, None);
        assert_eq!(trains[2].schedule, None);
        assert!(trains[2].title.is_some());
    }

    #[test]
    fn single_time_cell_leaves_times_unset() {
        let html = r#"<div class="list_items"><a>
            <div class="list_time"><div>06:12</div></div>
        </a></div>"#;
        let trains = extract_trains(&Html::parse_document(html), date());

        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].start_time, None);
        assert_eq!(trains[0].title, None);
    }

    #[test]
    fn advantages_drop_unknown_markers() {
        let document = Html::parse_document(ROUTE_PAGE);
        let legends = extract_advantages(&document);

        assert_eq!(
            legends,
            vec![
                vec![TrainAdvantage::ElectronicRegistration, TrainAdvantage::FastTrain],
                vec![],
                vec![TrainAdvantage::ClassTrain],
            ]
        );
        assert!(legends.iter().flatten().all(TrainAdvantage::is_defined));
    }

    #[test]
    fn place_row_with_three_cells() {
        let parsed = rows("<table><tr><td>Сидячий</td><td>120</td><td>9,57 руб.</td></tr></table>");
        assert_eq!(
            parsed,
            vec![Some(PlaceInformation {
                place_type: PlaceType::Sedentary,
                available_seats: 120,
                price: Some("9,57 руб.".into()),
            })]
        );
    }

    #[test]
    fn place_rows_with_two_or_four_cells_are_skipped() {
        let parsed = rows(
            "<table>\
             <tr><td>Купе</td><td>12</td></tr>\
             <tr><td>СВ</td><td>2</td><td>60,00 руб.</td><td>экспресс</td></tr>\
             </table>",
        );
        assert_eq!(parsed, vec![None, None]);
    }

    #[test]
    fn place_row_best_effort_fields() {
        let parsed = rows("<table><tr><td>Люкс</td><td>мест нет</td><td> </td></tr></table>");
        assert_eq!(
            parsed,
            vec![Some(PlaceInformation {
                place_type: PlaceType::Undefined,
                available_seats: 0,
                price: None,
            })]
        );
    }

    #[test]
    fn places_per_table() {
        let document = Html::parse_document(ROUTE_PAGE);
        let tables = extract_places(&document);

        assert_eq!(tables.len(), 2);
        let first: Vec<_> = tables[0].iter().map(|p| p.place_type).collect();
        assert_eq!(first, vec![PlaceType::Sedentary, PlaceType::Undefined]);
        assert_eq!(tables[1][1].place_type, PlaceType::General);
        assert_eq!(tables[1][1].available_seats, 35);
        assert_eq!(tables[1][0].available_seats, 0);
    }

    #[test]
    fn full_page_attaches_by_position() {
        let trains = parse_route_page(ROUTE_PAGE, date(), AlignmentPolicy::Truncate).unwrap();

        assert_eq!(trains.len(), 3);
        assert_eq!(trains[0].places.len(), 2);
        assert_eq!(trains[1].places.len(), 2);
        // Only two seat tables for three trains
        assert!(trains[2].places.is_empty());

        assert_eq!(trains[0].advantages.len(), 2);
        assert!(trains[1].advantages.is_empty());
        assert_eq!(trains[2].advantages, vec![TrainAdvantage::ClassTrain]);
    }

    #[test]
    fn fail_fast_rejects_short_collections() {
        let result = parse_route_page(ROUTE_PAGE, date(), AlignmentPolicy::FailFast);

        assert!(matches!(
            result,
            Err(RouteError::Misaligned {
                collection: "places tables",
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn empty_page_has_no_trains() {
        let trains = parse_route_page("<html></html>", date(), AlignmentPolicy::FailFast).unwrap();
        assert!(trains.is_empty());
    }
}
