// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::range::FilterRange;
use crate::registry::{FilterKind, FilterRegistry, RangeField};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single filter selection as emitted by a filter picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Flag(bool),
    Number(f64),
    /// Categorical single-select or a range-encoded string.
    Text(String),
    /// Categorical multi-select.
    List(Vec<String>),
}

/// Filter key -> selection. Absent keys impose no constraint.
pub type FilterSelectionSet = BTreeMap<String, FilterValue>;

impl FilterValue {
    /// Interprets a raw command-line value: `true`/`false` become flags,
    /// comma lists become multi-selects, everything else stays text so that
    /// range encodings like `"10-20"` reach the range parser untouched.
    pub fn from_cli(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "true" => FilterValue::Flag(true),
            "false" => FilterValue::Flag(false),
            _ if trimmed.contains(',') => FilterValue::List(
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            _ => FilterValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FilterValue::Flag(b) => Some(*b),
            FilterValue::Text(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            FilterValue::Number(n) => *n,
            FilterValue::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Lowercased values for categorical matching. `None` when the selection
    /// carries nothing to match against.
    fn categorical_terms(&self) -> Option<Vec<String>> {
        let terms: Vec<String> = match self {
            FilterValue::Text(s) if !s.is_empty() => vec![s.to_lowercase()],
            FilterValue::Number(n) => vec![n.to_string()],
            FilterValue::List(items) => items
                .iter()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase())
                .collect(),
            _ => Vec::new(),
        };
        (!terms.is_empty()).then_some(terms)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        FilterValue::List(value)
    }
}

/// Returns true when `record` satisfies every active selection.
///
/// Keys missing from the registry and selections whose shape does not fit
/// the dimension are ignored.
pub fn matches<R>(record: &R, filters: &FilterSelectionSet, registry: &FilterRegistry<R>) -> bool {
    filters.iter().all(|(key, value)| match registry.get(key) {
        Some(def) => accepts(&def.kind, record, value).unwrap_or_else(|| {
            debug!(
                "Filter ignored — key={} kind={} value={:?}",
                key,
                def.kind.label(),
                value
            );
            true
        }),
        None => {
            debug!("Unknown filter key ignored — key={}", key);
            true
        }
    })
}

/// Narrows `records` to those matching `filters`, preserving order.
pub fn filter_records<'a, R>(
    records: &'a [R],
    filters: &FilterSelectionSet,
    registry: &FilterRegistry<R>,
) -> Vec<&'a R> {
    records
        .iter()
        .filter(|r| matches(*r, filters, registry))
        .collect()
}

/// `None` means the selection is inactive for this dimension.
fn accepts<R>(kind: &FilterKind<R>, record: &R, value: &FilterValue) -> Option<bool> {
    match kind {
        FilterKind::Categorical(field) => {
            let terms = value.categorical_terms()?;
            Some(field(record).is_some_and(|v| {
                let v = v.to_lowercase();
                terms.iter().any(|t| *t == v)
            }))
        }
        FilterKind::ServiceTag {
            keywords,
            tags,
            direct,
        } => {
            if value.as_flag()? {
                Some(tags(record).iter().any(|tag| {
                    let tag = tag.to_lowercase();
                    keywords.iter().any(|k| tag.contains(k))
                }))
            } else {
                Some(direct.map_or(true, |f| f(record) != Some(true)))
            }
        }
        FilterKind::Flag(field) => {
            let wanted = value.as_flag()?;
            let actual = field(record) == Some(true);
            Some(actual == wanted)
        }
        FilterKind::MinRating(field) => {
            let threshold = value.as_number()?;
            Some(field(record).map_or(true, |rating| rating >= threshold))
        }
        FilterKind::Range(source) => {
            let range = FilterRange::parse(value.as_text()?)?;
            let actual = match source {
                RangeField::Number(field) => field(record).filter(|v| v.is_finite()),
                RangeField::Year(field) => field(record).and_then(leading_integer),
            };
            Some(actual.is_some_and(|v| range.contains(v)))
        }
    }
}

/// Leading integer of a date-like string: "1923" and "1923-05-01" both give 1923.
fn leading_integer(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse::<f64>().ok().map(|n| sign * n)
}
