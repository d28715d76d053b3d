// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Filter-key registries.
//!
//! Each browsable record type declares its filter dimensions as data: a key
//! as it appears in a selection set, the kind of check, and the accessor
//! that pulls the relevant field out of a record. Adding a dimension means
//! adding a row here, not a branch in the filter.

use crate::record::{Airline, Airport, BrowseRecord};
use std::sync::OnceLock;

pub type TextField<R> = for<'a> fn(&'a R) -> Option<&'a str>;
pub type TagsField<R> = for<'a> fn(&'a R) -> &'a [String];
pub type FlagField<R> = fn(&R) -> Option<bool>;
pub type NumberField<R> = fn(&R) -> Option<f64>;

/// Where a range filter reads its number from.
pub enum RangeField<R> {
    Number(NumberField<R>),
    /// A date-like string whose leading integer is the year ("1923", "1923-05-01").
    Year(TextField<R>),
}

pub enum FilterKind<R> {
    /// Case-insensitive equality against one or more selected values.
    Categorical(TextField<R>),
    /// Satisfied when any tag contains any keyword (keywords are lowercase).
    /// `direct` is the dedicated boolean consulted when the filter is `false`.
    ServiceTag {
        keywords: &'static [&'static str],
        tags: TagsField<R>,
        direct: Option<FlagField<R>>,
    },
    Flag(FlagField<R>),
    /// Lower bound; a record without a rating is not rejected.
    MinRating(NumberField<R>),
    Range(RangeField<R>),
}

impl<R> FilterKind<R> {
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::Categorical(_) => "categorical",
            FilterKind::ServiceTag { .. } => "service",
            FilterKind::Flag(_) => "boolean",
            FilterKind::MinRating(_) => "rating",
            FilterKind::Range(_) => "range",
        }
    }
}

pub struct FilterDef<R> {
    pub key: &'static str,
    pub kind: FilterKind<R>,
}

impl<R> FilterDef<R> {
    pub fn categorical(key: &'static str, field: TextField<R>) -> Self {
        Self {
            key,
            kind: FilterKind::Categorical(field),
        }
    }

    pub fn service(
        key: &'static str,
        keywords: &'static [&'static str],
        tags: TagsField<R>,
        direct: Option<FlagField<R>>,
    ) -> Self {
        Self {
            key,
            kind: FilterKind::ServiceTag {
                keywords,
                tags,
                direct,
            },
        }
    }

    pub fn flag(key: &'static str, field: FlagField<R>) -> Self {
        Self {
            key,
            kind: FilterKind::Flag(field),
        }
    }

    pub fn min_rating(key: &'static str, field: NumberField<R>) -> Self {
        Self {
            key,
            kind: FilterKind::MinRating(field),
        }
    }

    pub fn number_range(key: &'static str, field: NumberField<R>) -> Self {
        Self {
            key,
            kind: FilterKind::Range(RangeField::Number(field)),
        }
    }

    pub fn year_range(key: &'static str, field: TextField<R>) -> Self {
        Self {
            key,
            kind: FilterKind::Range(RangeField::Year(field)),
        }
    }
}

pub struct FilterRegistry<R> {
    defs: Vec<FilterDef<R>>,
}

impl<R> FilterRegistry<R> {
    pub fn new(defs: Vec<FilterDef<R>>) -> Self {
        Self { defs }
    }

    pub fn get(&self, key: &str) -> Option<&FilterDef<R>> {
        self.defs.iter().find(|d| d.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.iter().map(|d| d.key)
    }

    pub fn defs(&self) -> &[FilterDef<R>] {
        &self.defs
    }
}

/// Record types that ship with a built-in filter registry.
pub trait Filterable: BrowseRecord + Sized + 'static {
    fn registry() -> &'static FilterRegistry<Self>;
}

impl Filterable for Airport {
    fn registry() -> &'static FilterRegistry<Self> {
        airport_filters()
    }
}

impl Filterable for Airline {
    fn registry() -> &'static FilterRegistry<Self> {
        airline_filters()
    }
}

const CAR_RENTAL: &[&str] = &[
    "car rental",
    "rental car",
    "rent a car",
    "rent-a-car",
    "hertz",
    "avis",
    "europcar",
    "sixt",
];
const LOUNGE: &[&str] = &["lounge"];
const HOTEL: &[&str] = &["hotel"];
const PARKING: &[&str] = &["parking", "car park"];
const PUBLIC_TRANSPORT: &[&str] = &["metro", "subway", "train", "rail", "bus", "shuttle"];
const INFLIGHT_WIFI: &[&str] = &["wifi", "wi-fi", "internet"];
const ENTERTAINMENT: &[&str] = &["entertainment", "ife", "movies", "streaming"];
const MEALS: &[&str] = &["meal", "catering", "dining", "snack"];

fn airport_has_metro(a: &Airport) -> Option<bool> {
    a.facilities.as_ref().and_then(|f| f.has_metro)
}

fn airport_services(a: &Airport) -> &[String] {
    a.facilities.as_ref().map_or(&[][..], |f| f.services.as_slice())
}

pub fn airport_filters() -> &'static FilterRegistry<Airport> {
    static REGISTRY: OnceLock<FilterRegistry<Airport>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        FilterRegistry::new(vec![
            FilterDef::categorical("region", |a: &Airport| a.region.as_deref()),
            FilterDef::categorical("country", |a: &Airport| a.country.as_deref()),
            FilterDef::categorical("airportType", |a: &Airport| a.airport_type.as_deref()),
            FilterDef::flag("is24Hour", |a: &Airport| {
                a.operations.as_ref().and_then(|o| o.is_24_hour)
            }),
            FilterDef::flag("hasMetro", airport_has_metro),
            FilterDef::flag("freeWifi", |a: &Airport| {
                a.facilities.as_ref().and_then(|f| f.free_wifi)
            }),
            FilterDef::service("hasCarRental", CAR_RENTAL, airport_services, None),
            FilterDef::service("hasLounge", LOUNGE, airport_services, None),
            FilterDef::service("hasHotel", HOTEL, airport_services, None),
            FilterDef::service("hasParking", PARKING, airport_services, None),
            FilterDef::service(
                "hasPublicTransport",
                PUBLIC_TRANSPORT,
                airport_services,
                Some(airport_has_metro as FlagField<Airport>),
            ),
            FilterDef::min_rating("minRating", |a: &Airport| a.rating),
            FilterDef::year_range("openedYear", |a: &Airport| a.opened.as_deref()),
            FilterDef::number_range("annualPassengers", |a: &Airport| {
                a.operations.as_ref().and_then(|o| o.annual_passengers)
            }),
            FilterDef::number_range("runwayCount", |a: &Airport| {
                a.operations
                    .as_ref()
                    .and_then(|o| o.runway_count)
                    .map(f64::from)
            }),
            FilterDef::number_range("terminalCount", |a: &Airport| {
                a.operations
                    .as_ref()
                    .and_then(|o| o.terminal_count)
                    .map(f64::from)
            }),
            FilterDef::number_range("areaKm2", |a: &Airport| {
                a.operations.as_ref().and_then(|o| o.area_km2)
            }),
            FilterDef::number_range("parkingCapacity", |a: &Airport| {
                a.facilities.as_ref().and_then(|f| f.parking_capacity)
            }),
        ])
    })
}

fn airline_services(a: &Airline) -> &[String] {
    &a.services
}

pub fn airline_filters() -> &'static FilterRegistry<Airline> {
    static REGISTRY: OnceLock<FilterRegistry<Airline>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        FilterRegistry::new(vec![
            FilterDef::categorical("region", |a: &Airline| a.region.as_deref()),
            FilterDef::categorical("country", |a: &Airline| a.country.as_deref()),
            FilterDef::categorical("businessType", |a: &Airline| a.business_type.as_deref()),
            FilterDef::categorical("alliance", |a: &Airline| a.alliance.as_deref()),
            FilterDef::flag("isLowCost", |a: &Airline| a.is_low_cost),
            FilterDef::service("hasWifi", INFLIGHT_WIFI, airline_services, None),
            FilterDef::service("hasEntertainment", ENTERTAINMENT, airline_services, None),
            FilterDef::service("hasLoungeAccess", LOUNGE, airline_services, None),
            FilterDef::service("hasMeals", MEALS, airline_services, None),
            FilterDef::min_rating("minRating", |a: &Airline| a.rating),
            FilterDef::year_range("foundedYear", |a: &Airline| a.founded.as_deref()),
            FilterDef::number_range("fleetSize", |a: &Airline| {
                a.fleet.as_ref().and_then(|f| f.size)
            }),
            FilterDef::number_range("fleetAge", |a: &Airline| {
                a.fleet.as_ref().and_then(|f| f.average_age)
            }),
            FilterDef::number_range("destinationCount", Airline::destination_count),
            FilterDef::number_range("hubCount", |a: &Airline| {
                a.network.as_ref().map(|n| n.hubs.len() as f64)
            }),
        ])
    })
}
