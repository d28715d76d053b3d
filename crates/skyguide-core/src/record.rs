// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Common surface the search pipeline needs from any browsable record.
pub trait BrowseRecord {
    /// Short code (IATA) used for exact-match priority.
    fn short_code(&self) -> Option<&str>;
    /// Long code (ICAO).
    fn long_code(&self) -> Option<&str>;
    fn name(&self) -> Option<&str>;
    fn city(&self) -> Option<&str>;
    fn country(&self) -> Option<&str>;

    /// Fields scanned by substring search, in match order.
    fn search_fields(&self) -> [Option<&str>; 5] {
        [
            self.name(),
            self.city(),
            self.country(),
            self.short_code(),
            self.long_code(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Airport,
    Airline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Airport {
    #[serde(deserialize_with = "lenient_text")]
    pub iata_code: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub icao_code: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub region: Option<String>,
    /// "international", "domestic", "regional", "military", ...
    #[serde(deserialize_with = "lenient_text")]
    pub airport_type: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub lon: Option<f64>,
    /// Opening date as published, usually "YYYY" or "YYYY-MM-DD".
    #[serde(deserialize_with = "lenient_text")]
    pub opened: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "lenient_nested")]
    pub operations: Option<AirportOperations>,
    #[serde(deserialize_with = "lenient_nested")]
    pub facilities: Option<AirportFacilities>,
    #[serde(deserialize_with = "lenient_nested")]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AirportOperations {
    #[serde(rename = "is24Hour", deserialize_with = "lenient_bool")]
    pub is_24_hour: Option<bool>,
    #[serde(deserialize_with = "lenient_number")]
    pub annual_passengers: Option<f64>,
    #[serde(deserialize_with = "lenient_count")]
    pub runway_count: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub terminal_count: Option<u32>,
    #[serde(deserialize_with = "lenient_number")]
    pub area_km2: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AirportFacilities {
    /// Free-text service tags, e.g. "Avis car rental", "Plaza Premium Lounge".
    #[serde(deserialize_with = "nullable_list")]
    pub services: Vec<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub has_metro: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub free_wifi: Option<bool>,
    #[serde(deserialize_with = "lenient_number")]
    pub parking_capacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    #[serde(deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Airline {
    #[serde(deserialize_with = "lenient_text")]
    pub iata_code: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub icao_code: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Headquarters city.
    #[serde(deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub region: Option<String>,
    /// "full-service", "low-cost", "regional", "cargo", "charter"
    #[serde(deserialize_with = "lenient_text")]
    pub business_type: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub alliance: Option<String>,
    /// Founding date as published, usually "YYYY".
    #[serde(deserialize_with = "lenient_text")]
    pub founded: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_low_cost: Option<bool>,
    #[serde(deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    /// Free-text onboard service tags, e.g. "Free Wi-Fi", "Hot meals".
    #[serde(deserialize_with = "nullable_list")]
    pub services: Vec<String>,
    #[serde(deserialize_with = "lenient_nested")]
    pub fleet: Option<Fleet>,
    #[serde(deserialize_with = "lenient_nested")]
    pub network: Option<Network>,
    #[serde(deserialize_with = "lenient_nested")]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fleet {
    #[serde(deserialize_with = "lenient_number")]
    pub size: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub average_age: Option<f64>,
    #[serde(deserialize_with = "nullable_list")]
    pub aircraft_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Network {
    #[serde(deserialize_with = "nullable_list")]
    pub destinations: Vec<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub destination_count: Option<f64>,
    #[serde(deserialize_with = "nullable_list")]
    pub hubs: Vec<String>,
}

impl BrowseRecord for Airport {
    fn short_code(&self) -> Option<&str> {
        self.iata_code.as_deref()
    }

    fn long_code(&self) -> Option<&str> {
        self.icao_code.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl BrowseRecord for Airline {
    fn short_code(&self) -> Option<&str> {
        self.iata_code.as_deref()
    }

    fn long_code(&self) -> Option<&str> {
        self.icao_code.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl Airline {
    /// Number of served destinations, falling back to the length of the
    /// destination list when no explicit count is published.
    pub fn destination_count(&self) -> Option<f64> {
        let network = self.network.as_ref()?;
        network.destination_count.or_else(|| {
            if network.destinations.is_empty() {
                None
            } else {
                Some(network.destinations.len() as f64)
            }
        })
    }
}

/// Tag lists: `null` or a non-array reads as empty, non-string entries are dropped.
fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Strings pass through, numbers keep their JSON spelling (`"opened": 1998`).
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// `true`/`false`, their string forms and `0`/`1`; anything else is unknown.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Sub-objects of the wrong shape read as absent instead of failing the record.
fn lenient_nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| T::deserialize(v).ok()))
}

/// Accepts JSON numbers and numeric strings ("45000000", " 3.5 ").
/// Anything else, including non-finite values, reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
