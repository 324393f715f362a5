//! Component-name recognition shared by every scorer.
//!
//! Keyword tables are ordered slices: the first entry whose keyword list has
//! a substring hit wins, so entry order is part of each scorer's behavior.

use crate::types::measurement::Measurement;
use chrono::NaiveDateTime;

pub type KeywordTable = [(&'static str, &'static [&'static str])];

pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// First table key whose keywords occur in `name_lower`.
pub fn keyword_match(name_lower: &str, table: &KeywordTable) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, keywords)| contains_any(name_lower, keywords))
        .map(|(key, _)| *key)
}

/// Direct key lookup on the lowercased name, then keyword scan.
pub fn classify_component(name: &str, table: &KeywordTable) -> Option<&'static str> {
    let lower = name.to_lowercase();
    table
        .iter()
        .find(|(key, _)| *key == lower)
        .map(|(key, _)| *key)
        .or_else(|| keyword_match(&lower, table))
}

/// One measurement per distinct component name, keeping the most recent.
///
/// Components keep the order in which they were first seen. A later record
/// only replaces the kept one when both dates parse and the later date is
/// strictly greater.
pub fn latest_per_component<'a, I>(measurements: I) -> Vec<&'a Measurement>
where
    I: IntoIterator<Item = &'a Measurement>,
{
    let mut latest: Vec<(&'a Measurement, Option<NaiveDateTime>)> = Vec::new();
    for measurement in measurements {
        let stamp = measurement.timestamp();
        match latest
            .iter_mut()
            .find(|(kept, _)| kept.component_name == measurement.component_name)
        {
            Some(slot) => {
                if let (Some(current), Some(kept)) = (stamp, slot.1) {
                    if current > kept {
                        *slot = (measurement, stamp);
                    }
                }
            }
            None => latest.push((measurement, stamp)),
        }
    }
    latest.into_iter().map(|(measurement, _)| measurement).collect()
}

/// Index of the smallest score; ties keep the earliest entry.
pub fn position_of_min<T>(items: &[T], score: impl Fn(&T) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, item) in items.iter().enumerate() {
        let value = score(item);
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

/// Index of the largest score; ties keep the latest entry, mirroring an
/// ascending stable sort followed by taking the last element.
pub fn position_of_max<T>(items: &[T], score: impl Fn(&T) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, item) in items.iter().enumerate() {
        let value = score(item);
        match best {
            Some((_, current)) if value < current => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}
