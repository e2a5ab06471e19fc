//! Departure and arrival time parsing.
//!
//! The results page prints times as "HH:MM", sometimes with a "DD.MM" or
//! full date next to it and a `<br />` between the two parts. Times without
//! a date are placed on the travel date of the query. A "DD.MM" date takes
//! the year that puts it closest to the reference date, so a trip across
//! New Year lands in the right year.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::dom::collapse_whitespace;

/// Formats carrying a full date, tried in order.
const FULL_FORMATS: &[&str] = &["%d.%m.%Y %H:%M", "%H:%M %d.%m.%Y", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParsedTime {
    at: NaiveDateTime,
    /// Whether the text named a date rather than only a clock time.
    has_date: bool,
}

fn parse_detailed(text: &str, reference: NaiveDate) -> Option<ParsedTime> {
    let text = collapse_whitespace(
        &text
            .replace("<br />", " ")
            .replace("<br/>", " ")
            .replace("<br>", " "),
    );

    for format in FULL_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(&text, format) {
            return Some(ParsedTime { at, has_date: true });
        }
    }

    let mut tokens = text.split(' ');
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(clock), None, None) => parse_clock(clock).map(|time| ParsedTime {
            at: reference.and_time(time),
            has_date: false,
        }),
        (Some(first), Some(second), None) => {
            let (time, day) = match parse_clock(first) {
                Some(time) => (time, second),
                None => (parse_clock(second)?, first),
            };
            let day = parse_day_month(day, reference)?;
            Some(ParsedTime {
                at: day.and_time(time),
                has_date: true,
            })
        }
        _ => None,
    }
}

fn parse_clock(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

fn parse_day_month(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let (day, month) = text.split_once('.')?;
    let (day, month): (u32, u32) = (day.parse().ok()?, month.parse().ok()?);
    let year = reference.year();

    [year - 1, year, year + 1]
        .into_iter()
        .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
        .min_by_key(|d| d.signed_duration_since(reference).num_days().abs())
}

/// Parse a single schedule time, using `date` when the text has no date.
///
/// Returns `None` for anything unrecognised.
///
/// ```
/// use chrono::NaiveDate;
/// use rasp_scraper::route::parse_schedule_time;
///
/// let date = NaiveDate::from_ymd_opt(2018, 8, 22).unwrap();
/// let at = parse_schedule_time("05:58", date).unwrap();
/// assert_eq!(at.to_string(), "2018-08-22 05:58:00");
/// assert!(parse_schedule_time("—", date).is_none());
/// ```
pub fn parse_schedule_time(text: &str, date: NaiveDate) -> Option<NaiveDateTime> {
    parse_detailed(text, date).map(|parsed| parsed.at)
}

/// Parse a departure/arrival pair.
///
/// Both must parse. The arrival is read relative to the departure date; one
/// given only as a clock time that falls before the departure is moved to
/// the following day.
pub fn parse_time_pair(
    start: &str,
    end: &str,
    date: NaiveDate,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = parse_detailed(start, date)?;
    let end = parse_detailed(end, start.at.date())?;

    let end_at = if !end.has_date && end.at < start.at {
        end.at + Duration::days(1)
    } else {
        end.at
    };

    Some((start.at, end_at))
}
