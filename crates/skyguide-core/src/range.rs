// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use regex::Regex;
use std::sync::OnceLock;

/// Numeric bounds decoded from a range-encoded filter value.
///
/// `max` is `f64::INFINITY` for open-ended `"N+"` values. Bounds are kept
/// exactly as written, so `"2024-2020"` yields a range that admits nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterRange {
    pub min: f64,
    pub max: f64,
}

// Integer or decimal with an optional exponent: "12", "3.5", "1e2", ".5"
const UNSIGNED: &str = r"(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

fn year_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})\s*-\s*(\d{4})$").unwrap())
}

fn numeric_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // The upper bound may not carry a minus sign: "10--20" is two separators.
    RE.get_or_init(|| {
        Regex::new(&format!(r"^([+-]?{UNSIGNED})\s*-\s*(\+?{UNSIGNED})$")).unwrap()
    })
}

fn open_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^([+-]?{UNSIGNED})\s*\+$")).unwrap())
}

impl FilterRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Open-ended range `[min, +inf]`.
    pub fn at_least(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
        }
    }

    /// Parses `"YYYY-YYYY"`, `"min-max"` or `"min+"`.
    /// Returns `None` for anything else; never panics.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }

        if let Some(caps) = year_range_re().captures(s) {
            let min = caps[1].parse::<u16>().ok()?;
            let max = caps[2].parse::<u16>().ok()?;
            return Some(Self::new(f64::from(min), f64::from(max)));
        }

        if let Some(caps) = numeric_range_re().captures(s) {
            let min = parse_finite(&caps[1])?;
            let max = parse_finite(&caps[2])?;
            return Some(Self::new(min, max));
        }

        if let Some(caps) = open_range_re().captures(s) {
            return parse_finite(&caps[1]).map(Self::at_least);
        }

        None
    }

    pub fn is_open_ended(&self) -> bool {
        self.max == f64::INFINITY
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Convenience wrapper for optional filter values coming straight from
/// a selection set.
pub fn parse_range(input: Option<&str>) -> Option<FilterRange> {
    input.and_then(FilterRange::parse)
}

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
