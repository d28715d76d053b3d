// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Option lists offered by filter pickers.
//!
//! Range options carry values in the exact shapes [`crate::range::FilterRange`]
//! understands; anything else would silently disable the filter.

use crate::record::RecordKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub label: &'static str,
    pub value: &'static str,
}

const fn opt(label: &'static str, value: &'static str) -> FilterOption {
    FilterOption { label, value }
}

pub const REGIONS: &[FilterOption] = &[
    opt("Europe", "europe"),
    opt("Asia", "asia"),
    opt("Middle East", "middle east"),
    opt("Africa", "africa"),
    opt("North America", "north america"),
    opt("South America", "south america"),
    opt("Oceania", "oceania"),
];

pub const AIRPORT_TYPES: &[FilterOption] = &[
    opt("International", "international"),
    opt("Domestic", "domestic"),
    opt("Regional", "regional"),
    opt("Military", "military"),
    opt("Private", "private"),
];

pub const PASSENGER_RANGES: &[FilterOption] = &[
    opt("Under 1M", "0-1000000"),
    opt("1M - 10M", "1000000-10000000"),
    opt("10M - 50M", "10000000-50000000"),
    opt("50M+", "50000000+"),
];

pub const RUNWAY_RANGES: &[FilterOption] = &[
    opt("1", "1-1"),
    opt("2 - 3", "2-3"),
    opt("4+", "4+"),
];

pub const TERMINAL_RANGES: &[FilterOption] = &[
    opt("1", "1-1"),
    opt("2 - 4", "2-4"),
    opt("5+", "5+"),
];

pub const AREA_RANGES: &[FilterOption] = &[
    opt("Under 5 km²", "0-5"),
    opt("5 - 20 km²", "5-20"),
    opt("20 km²+", "20+"),
];

pub const PARKING_RANGES: &[FilterOption] = &[
    opt("Under 5,000", "0-5000"),
    opt("5,000 - 20,000", "5000-20000"),
    opt("20,000+", "20000+"),
];

pub const OPENED_YEAR_RANGES: &[FilterOption] = &[
    opt("Before 1950", "1900-1949"),
    opt("1950 - 1979", "1950-1979"),
    opt("1980 - 1999", "1980-1999"),
    opt("2000 - 2019", "2000-2019"),
    opt("2020+", "2020+"),
];

pub const RATINGS: &[FilterOption] = &[
    opt("3+", "3"),
    opt("3.5+", "3.5"),
    opt("4+", "4"),
    opt("4.5+", "4.5"),
];

pub const BUSINESS_TYPES: &[FilterOption] = &[
    opt("Full Service", "full-service"),
    opt("Low Cost", "low-cost"),
    opt("Regional", "regional"),
    opt("Cargo", "cargo"),
    opt("Charter", "charter"),
];

pub const ALLIANCES: &[FilterOption] = &[
    opt("Star Alliance", "star alliance"),
    opt("oneworld", "oneworld"),
    opt("SkyTeam", "skyteam"),
];

pub const FOUNDED_YEAR_RANGES: &[FilterOption] = &[
    opt("Before 1950", "1900-1949"),
    opt("1950 - 1989", "1950-1989"),
    opt("1990 - 2009", "1990-2009"),
    opt("2010+", "2010+"),
];

pub const FLEET_SIZE_RANGES: &[FilterOption] = &[
    opt("Under 50", "0-49"),
    opt("50 - 199", "50-199"),
    opt("200 - 499", "200-499"),
    opt("500+", "500+"),
];

pub const FLEET_AGE_RANGES: &[FilterOption] = &[
    opt("Under 5 years", "0-5"),
    opt("5 - 10 years", "5-10"),
    opt("10 - 15 years", "10-15"),
    opt("15+ years", "15+"),
];

pub const DESTINATION_RANGES: &[FilterOption] = &[
    opt("Under 50", "0-49"),
    opt("50 - 149", "50-149"),
    opt("150 - 299", "150-299"),
    opt("300+", "300+"),
];

pub const HUB_RANGES: &[FilterOption] = &[
    opt("1", "1-1"),
    opt("2 - 3", "2-3"),
    opt("4+", "4+"),
];

/// Options for a filter key, or `None` for keys without a fixed list
/// (boolean flags, free-text country).
pub fn options_for(kind: RecordKind, key: &str) -> Option<&'static [FilterOption]> {
    let options = match (kind, key) {
        (_, "region") => REGIONS,
        (_, "minRating") => RATINGS,
        (RecordKind::Airport, "airportType") => AIRPORT_TYPES,
        (RecordKind::Airport, "annualPassengers") => PASSENGER_RANGES,
        (RecordKind::Airport, "runwayCount") => RUNWAY_RANGES,
        (RecordKind::Airport, "terminalCount") => TERMINAL_RANGES,
        (RecordKind::Airport, "areaKm2") => AREA_RANGES,
        (RecordKind::Airport, "parkingCapacity") => PARKING_RANGES,
        (RecordKind::Airport, "openedYear") => OPENED_YEAR_RANGES,
        (RecordKind::Airline, "businessType") => BUSINESS_TYPES,
        (RecordKind::Airline, "alliance") => ALLIANCES,
        (RecordKind::Airline, "foundedYear") => FOUNDED_YEAR_RANGES,
        (RecordKind::Airline, "fleetSize") => FLEET_SIZE_RANGES,
        (RecordKind::Airline, "fleetAge") => FLEET_AGE_RANGES,
        (RecordKind::Airline, "destinationCount") => DESTINATION_RANGES,
        (RecordKind::Airline, "hubCount") => HUB_RANGES,
        _ => return None,
    };
    Some(options)
}

/// Looks up the display label for a selected value.
pub fn label_for(kind: RecordKind, key: &str, value: &str) -> Option<&'static str> {
    options_for(kind, key)?
        .iter()
        .find(|o| o.value.eq_ignore_ascii_case(value))
        .map(|o| o.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::FilterRange;
    use crate::record::{Airline, Airport};
    use crate::registry::{FilterKind, FilterRegistry, Filterable};

    fn check_registry<R>(kind: RecordKind, registry: &FilterRegistry<R>) {
        for def in registry.defs() {
            let Some(options) = options_for(kind, def.key) else {
                continue;
            };
            for option in options {
                match def.kind {
                    FilterKind::Range(_) => assert!(
                        FilterRange::parse(option.value).is_some(),
                        "{}: {:?} is not a valid range",
                        def.key,
                        option.value
                    ),
                    FilterKind::MinRating(_) => assert!(
                        option.value.parse::<f64>().is_ok(),
                        "{}: {:?} is not a number",
                        def.key,
                        option.value
                    ),
                    _ => assert!(!option.value.is_empty()),
                }
            }
        }
    }

    #[test]
    fn test_catalog_values_match_filter_kinds() {
        check_registry(RecordKind::Airport, Airport::registry());
        check_registry(RecordKind::Airline, Airline::registry());
    }

    #[test]
    fn test_every_catalog_key_is_registered() {
        let airport_keys = [
            "region",
            "minRating",
            "airportType",
            "annualPassengers",
            "runwayCount",
            "terminalCount",
            "areaKm2",
            "parkingCapacity",
            "openedYear",
        ];
        for key in airport_keys {
            assert!(options_for(RecordKind::Airport, key).is_some());
            assert!(Airport::registry().contains(key), "{}", key);
        }
        assert!(options_for(RecordKind::Airport, "fleetSize").is_none());
        assert!(options_for(RecordKind::Airline, "fleetSize").is_some());
    }

    #[test]
    fn test_label_lookup() {
        assert_eq!(
            label_for(RecordKind::Airport, "annualPassengers", "50000000+"),
            Some("50M+")
        );
        assert_eq!(
            label_for(RecordKind::Airline, "alliance", "SkyTeam"),
            Some("SkyTeam")
        );
        assert_eq!(label_for(RecordKind::Airline, "alliance", "none"), None);
    }
}
