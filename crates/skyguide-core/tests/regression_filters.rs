// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use skyguide_core::catalog;
use skyguide_core::{
    filter_records, matches, parse_range, Airline, Airport, FilterRange, FilterSelectionSet,
    FilterValue, Filterable, RecordKind,
};

fn airlines() -> Vec<Airline> {
    serde_json::from_str(
        r#"[
            { "iataCode": "TK", "name": "Turkish Airlines", "region": "Europe",
              "businessType": "full-service", "alliance": "Star Alliance", "founded": "1933",
              "rating": 4.3, "services": ["Free Wi-Fi", "Hot meals"],
              "fleet": { "size": 440, "averageAge": 9.1 },
              "network": { "destinationCount": 340, "hubs": ["IST"] } },
            { "iataCode": "PC", "name": "Pegasus", "region": "Europe",
              "businessType": "low-cost", "isLowCost": true, "founded": "1990-01-01",
              "rating": "3.6", "services": null,
              "fleet": { "size": "110" },
              "network": { "destinations": ["SAW", "AYT", "ESB"], "hubs": ["SAW", "ADB"] } },
            { "iataCode": "XX", "name": "Unrated Air" }
        ]"#,
    )
    .unwrap()
}

fn select(pairs: &[(&str, FilterValue)]) -> FilterSelectionSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn codes(records: Vec<&Airline>) -> Vec<&str> {
    records
        .into_iter()
        .filter_map(|a| a.iata_code.as_deref())
        .collect()
}

#[test]
fn test_range_encodings() {
    assert_eq!(parse_range(Some("1990-2000")), Some(FilterRange::new(1990.0, 2000.0)));
    assert_eq!(parse_range(Some("50000000+")), Some(FilterRange::at_least(50_000_000.0)));
    assert_eq!(parse_range(Some("0-1000000")), Some(FilterRange::new(0.0, 1_000_000.0)));
    assert_eq!(parse_range(Some("abc")), None);
    assert_eq!(parse_range(Some("")), None);
    assert_eq!(parse_range(None), None);

    let reversed = parse_range(Some("2000-1990")).unwrap();
    assert!(!reversed.contains(1995.0));
}

#[test]
fn test_empty_selection_admits_everything() {
    let records = airlines();
    let all = filter_records(&records, &FilterSelectionSet::new(), Airline::registry());
    assert_eq!(all.len(), records.len());
}

#[test]
fn test_missing_rating_is_not_rejected() {
    let records = airlines();
    let filters = select(&[("minRating", FilterValue::Number(4.0))]);
    assert_eq!(
        codes(filter_records(&records, &filters, Airline::registry())),
        vec!["TK", "XX"]
    );
}

#[test]
fn test_missing_range_value_is_rejected() {
    let records = airlines();
    let filters = select(&[("fleetSize", FilterValue::from("100-500"))]);
    assert_eq!(
        codes(filter_records(&records, &filters, Airline::registry())),
        vec!["TK", "PC"]
    );
}

#[test]
fn test_destination_count_falls_back_to_list_length() {
    let records = airlines();
    let filters = select(&[("destinationCount", FilterValue::from("1-10"))]);
    assert_eq!(
        codes(filter_records(&records, &filters, Airline::registry())),
        vec!["PC"]
    );
}

#[test]
fn test_founded_year_uses_leading_year() {
    let records = airlines();
    let filters = select(&[("foundedYear", FilterValue::from("1990-2009"))]);
    assert_eq!(
        codes(filter_records(&records, &filters, Airline::registry())),
        vec!["PC"]
    );
}

#[test]
fn test_categorical_multi_select_ignores_case() {
    let records = airlines();
    let filters = select(&[(
        "businessType",
        FilterValue::List(vec!["Low-Cost".into(), "cargo".into()]),
    )]);
    assert_eq!(
        codes(filter_records(&records, &filters, Airline::registry())),
        vec!["PC"]
    );

    let filters = select(&[("alliance", FilterValue::from("star alliance"))]);
    assert_eq!(
        codes(filter_records(&records, &filters, Airline::registry())),
        vec!["TK"]
    );
}

#[test]
fn test_service_keywords_match_tags() {
    let records = airlines();
    let filters = select(&[
        ("hasWifi", FilterValue::Flag(true)),
        ("hasMeals", FilterValue::Flag(true)),
    ]);
    assert_eq!(
        codes(filter_records(&records, &filters, Airline::registry())),
        vec!["TK"]
    );
}

#[test]
fn test_unknown_and_unparseable_selections_are_ignored() {
    let records = airlines();
    let filters = select(&[
        ("noSuchFilter", FilterValue::Flag(true)),
        ("fleetSize", FilterValue::from("lots")),
        ("region", FilterValue::List(Vec::new())),
    ]);
    for record in &records {
        assert!(matches(record, &filters, Airline::registry()));
    }
}

#[test]
fn test_selection_set_from_json() {
    let filters: FilterSelectionSet = serde_json::from_str(
        r#"{ "is24Hour": true, "minRating": 4, "region": ["europe", "asia"], "openedYear": "2000+" }"#,
    )
    .unwrap();
    assert_eq!(filters["is24Hour"], FilterValue::Flag(true));
    assert_eq!(filters["minRating"], FilterValue::Number(4.0));
    assert_eq!(
        filters["region"],
        FilterValue::List(vec!["europe".into(), "asia".into()])
    );

    let istanbul: Airport = serde_json::from_str(
        r#"{ "iataCode": "IST", "region": "Europe", "opened": "2018", "rating": 4.4,
             "operations": { "is24Hour": true } }"#,
    )
    .unwrap();
    assert!(matches(&istanbul, &filters, Airport::registry()));
}

#[test]
fn test_catalog_options_drive_filters() {
    let records = airlines();
    let option = catalog::options_for(RecordKind::Airline, "fleetSize")
        .unwrap()
        .iter()
        .find(|o| o.label == "500+")
        .unwrap();
    let filters = select(&[("fleetSize", FilterValue::from(option.value))]);
    assert!(filter_records(&records, &filters, Airline::registry()).is_empty());
}
