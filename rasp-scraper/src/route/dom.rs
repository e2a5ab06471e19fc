//! DOM selectors and text helpers shared by the page parsers.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

/// Compiled CSS selectors for the route and board pages.
pub(crate) struct Selectors {
    pub list_item: Selector,
    pub list_title: Selector,
    pub list_schedule: Selector,
    pub list_time: Selector,
    pub legend: Selector,
    pub legend_marker: Selector,
    pub places_table: Selector,
    pub row: Selector,
    pub cell: Selector,
    pub board_item: Selector,
    pub board_name: Selector,
    pub board_type: Selector,
    pub board_number: Selector,
    pub board_info: Selector,
}

pub(crate) static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    list_item: compile("div.list_items a"),
    list_title: compile("div.list_content div"),
    list_schedule: compile("div.list_content span"),
    list_time: compile("div.list_time div"),
    legend: compile("div.b-legend"),
    legend_marker: compile("i"),
    places_table: compile("table.places_table"),
    row: compile("tr"),
    cell: compile("td"),
    board_item: compile("div.t-item"),
    board_name: compile("div.name"),
    board_type: compile("div.type"),
    board_number: compile("div.num i"),
    board_info: compile("div.info-block i"),
});

fn compile(css: &'static str) -> Selector {
    // Only called with the literals above, all of which are valid CSS
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Concatenated text content of an element and its descendants.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text nodes of an element joined by single spaces.
///
/// Keeps parts separated by markup such as `<br />` apart.
pub fn spaced_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Collapse runs of whitespace to single spaces and trim.
///
/// ```
/// use rasp_scraper::route::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Минск \n  Брест "), "Минск Брест");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-collapsed text of the first `selector` match, `None` when
/// missing or blank.
pub(crate) fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|e| collapse_whitespace(&element_text(e)))
        .filter(|text| !text.is_empty())
}
