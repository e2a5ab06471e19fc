//! Deduplication, ordering and country grouping of station candidates.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::client::StationCandidate;

/// Identity of a candidate for deduplication.
///
/// Covers every field except `exp` and the derived `country`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DedupKey<'a> {
    prefix: &'a str,
    label: &'a str,
    label_tail: &'a str,
    value: &'a str,
    gid: &'a str,
    lon: &'a str,
    lat: &'a str,
    ecp: &'a str,
    otd: &'a str,
}

impl StationCandidate {
    pub fn dedup_key(&self) -> DedupKey<'_> {
        DedupKey {
            prefix: &self.prefix,
            label: &self.label,
            label_tail: &self.label_tail,
            value: &self.value,
            gid: &self.gid,
            lon: &self.lon,
            lat: &self.lat,
            ecp: &self.ecp,
            otd: &self.otd,
        }
    }
}

/// Stations sharing a derived country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryGroup {
    pub country: String,
    pub stations: Vec<StationCandidate>,
}

/// Remove duplicates, keeping the first occurrence of each identity.
pub fn deduplicate(candidates: Vec<StationCandidate>) -> Vec<StationCandidate> {
    let mut keep = Vec::with_capacity(candidates.len());
    {
        let mut seen = HashSet::with_capacity(candidates.len());
        for candidate in &candidates {
            keep.push(seen.insert(candidate.dedup_key()));
        }
    }

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(candidate, keep)| keep.then_some(candidate))
        .collect()
}

/// Stable sort by `value`.
pub fn sort_by_value(candidates: &mut [StationCandidate]) {
    candidates.sort_by(|a, b| a.value.cmp(&b.value));
}

/// Country is the last whitespace-delimited token of the label tail.
///
/// ```
/// use rasp_scraper::stations::derive_country;
///
/// assert_eq!(derive_country("  Минск  обл."), "обл.");
/// assert_eq!(derive_country("Литва"), "Литва");
/// assert_eq!(derive_country("   "), "");
/// ```
pub fn derive_country(label_tail: &str) -> String {
    label_tail
        .split_whitespace()
        .next_back()
        .unwrap_or_default()
        .to_string()
}

pub fn assign_countries(candidates: &mut [StationCandidate]) {
    for candidate in candidates {
        candidate.country = derive_country(&candidate.label_tail);
    }
}

/// Partition by `country`, in order of first appearance.
pub fn group_by_country(candidates: Vec<StationCandidate>) -> Vec<CountryGroup> {
    let mut groups: Vec<CountryGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        match index.get(&candidate.country) {
            Some(&i) => groups[i].stations.push(candidate),
            None => {
                index.insert(candidate.country.clone(), groups.len());
                groups.push(CountryGroup {
                    country: candidate.country.clone(),
                    stations: vec![candidate],
                });
            }
        }
    }

    groups
}

/// Deduplicate, sort, derive countries and group.
pub fn process(candidates: Vec<StationCandidate>) -> Vec<CountryGroup> {
    let mut unique = deduplicate(candidates);
    sort_by_value(&mut unique);
    assign_countries(&mut unique);
    group_by_country(unique)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(value: &str, label_tail: &str) -> StationCandidate {
        StationCandidate {
            prefix: String::new(),
            label: value.to_string(),
            label_tail: label_tail.to_string(),
            value: value.to_string(),
            gid: "1".to_string(),
            lon: "27.5".to_string(),
            lat: "53.9".to_string(),
            exp: "2100000".to_string(),
            ecp: String::new(),
            otd: String::new(),
            country: String::new(),
        }
    }

    #[test]
    fn identical_candidates_collapse() {
        let items = vec![
            candidate("Минск", "Минская обл."),
            candidate("Минск", "Минская обл."),
            candidate("Брест", "Брестская обл."),
        ];

        let unique = deduplicate(items);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].value, "Минск");
        assert_eq!(unique[1].value, "Брест");
    }

    #[test]
    fn exp_is_not_part_of_identity() {
        let a = candidate("Минск", "Минская обл.");
        let mut b = a.clone();
        b.exp = "9999999".to_string();

        let unique = deduplicate(vec![a, b]);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].exp, "2100000");
    }

    #[test]
    fn any_other_field_distinguishes() {
        let a = candidate("Минск", "Минская обл.");
        let mut b = a.clone();
        b.otd = "Бел".to_string();
        let mut c = a.clone();
        c.gid = "2".to_string();

        assert_eq!(deduplicate(vec![a, b, c]).len(), 3);
    }

    #[test]
    fn sort_is_stable() {
        let mut first = candidate("Орша", "Витебская обл.");
        first.gid = "first".to_string();
        let mut second = candidate("Орша", "Витебская обл.");
        second.gid = "second".to_string();

        let mut items = vec![first, candidate("Гомель", "Гомельская обл."), second];
        sort_by_value(&mut items);

        let order: Vec<_> = items.iter().map(|c| (c.value.as_str(), c.gid.as_str())).collect();
        assert_eq!(
            order,
            vec![("Гомель", "1"), ("Орша", "first"), ("Орша", "second")]
        );
    }

    #[test]
    fn country_from_label_tail() {
        assert_eq!(derive_country("  Минск  обл."), "обл.");
        assert_eq!(derive_country("Россия"), "Россия");
        assert_eq!(derive_country(""), "");
    }

    #[test]
    fn groups_follow_first_appearance() {
        let mut items = vec![
            candidate("Брест", "Брестская обл."),
            candidate("Вильнюс", "Литва"),
            candidate("Минск", "Минская обл."),
        ];
        assign_countries(&mut items);

        let groups = group_by_country(items);
        let countries: Vec<_> = groups.iter().map(|g| g.country.as_str()).collect();
        assert_eq!(countries, vec!["обл.", "Литва"]);
        assert_eq!(groups[0].stations.len(), 2);
        assert_eq!(groups[0].stations[1].value, "Минск");
    }

    #[test]
    fn process_runs_every_step() {
        let items = vec![
            candidate("Минск", "Минская обл."),
            candidate("Вильнюс", "Литва"),
            candidate("Минск", "Минская обл."),
            candidate("Брест", "Брестская обл."),
        ];

        let groups = process(items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].country, "обл.");
        assert_eq!(groups[0].stations[0].value, "Брест");
        assert_eq!(groups[0].stations[0].country, "обл.");
        assert_eq!(groups[1].country, "Литва");
    }
}
