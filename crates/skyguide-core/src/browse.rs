// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Search, filter and page view over one in-memory record collection.

use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::filter::{self, FilterSelectionSet};
use crate::record::BrowseRecord;
use crate::registry::{FilterRegistry, Filterable};
use crate::source::{FetchState, SourceError};
use log::debug;
use std::time::{Duration, Instant};

pub const PAGE_SIZE: usize = 20;

/// Free-text search with exact-code priority.
///
/// If any record's short code equals the term (ignoring case), only those
/// records are returned. Otherwise a record matches when the term is a
/// substring of its name, city, country or either code. A blank term
/// matches everything.
pub fn search_records<'a, R: BrowseRecord>(records: &'a [R], term: &str) -> Vec<&'a R> {
    search_indices(records, term)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

fn search_indices<R: BrowseRecord>(records: &[R], term: &str) -> Vec<usize> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return (0..records.len()).collect();
    }

    let exact: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.short_code().is_some_and(|c| c.to_lowercase() == term))
        .map(|(i, _)| i)
        .collect();
    if !exact.is_empty() {
        return exact;
    }

    records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.search_fields()
                .iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&term))
        })
        .map(|(i, _)| i)
        .collect()
}

/// What a list screen renders.
pub struct BrowseView<'a, R> {
    pub paginated_results: Vec<&'a R>,
    pub has_more: bool,
    pub filtered_count: usize,
    pub is_loading: bool,
    /// Raw search input has not settled into the applied term yet.
    pub is_search_loading: bool,
    /// Raw input as typed.
    pub search_term: &'a str,
    pub filters: &'a FilterSelectionSet,
    pub page: usize,
    pub error: Option<&'a SourceError>,
}

/// View state for one browse screen.
///
/// Holds the raw and debounced search term, the active filters, the page
/// counter and the latest fetch snapshot. The narrowed collection is
/// recomputed in full whenever the applied term, the filters or the
/// snapshot change; the page window is a slice of it.
pub struct BrowseState<R: 'static> {
    registry: &'static FilterRegistry<R>,
    fetch: FetchState<R>,
    raw_term: String,
    term: Debouncer<String>,
    filters: FilterSelectionSet,
    page: usize,
    page_size: usize,
    narrowed: Vec<usize>,
    generation: u64,
}

impl<R: Filterable> BrowseState<R> {
    pub fn new() -> Self {
        Self::with_registry(R::registry())
    }
}

impl<R: Filterable> Default for BrowseState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BrowseRecord + 'static> BrowseState<R> {
    pub fn with_registry(registry: &'static FilterRegistry<R>) -> Self {
        Self {
            registry,
            fetch: FetchState::loading(),
            raw_term: String::new(),
            term: Debouncer::new(String::new(), SEARCH_DEBOUNCE),
            filters: FilterSelectionSet::new(),
            page: 1,
            page_size: PAGE_SIZE,
            narrowed: Vec::new(),
            generation: 0,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.term = Debouncer::new(self.term.settled().clone(), delay);
        self
    }

    /// Updates the raw input immediately; the applied term follows after the
    /// quiet period (see [`BrowseState::tick`]).
    pub fn set_search_term(&mut self, term: impl Into<String>, now: Instant) {
        self.raw_term = term.into();
        self.term.push(self.raw_term.clone(), now);
    }

    /// Promotes a settled search term. Returns true if the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.term.poll(now) {
            self.page = 1;
            self.recompute();
            true
        } else {
            false
        }
    }

    /// Applies the pending search term without waiting, e.g. on Enter.
    pub fn submit_search(&mut self) -> bool {
        if self.term.flush() {
            self.page = 1;
            self.recompute();
            true
        } else {
            false
        }
    }

    pub fn set_filters(&mut self, filters: FilterSelectionSet) {
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        self.page = 1;
        self.recompute();
    }

    pub fn update_filters<F: FnOnce(&mut FilterSelectionSet)>(&mut self, update: F) {
        let mut next = self.filters.clone();
        update(&mut next);
        self.set_filters(next);
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(FilterSelectionSet::new());
    }

    /// Replaces the fetch snapshot. The page is kept; the window is clamped
    /// naturally by the new collection length.
    pub fn set_fetch_state(&mut self, fetch: FetchState<R>) {
        self.fetch = fetch;
        self.recompute();
    }

    /// Advances one page when more results exist and no load is running.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() || self.fetch.is_loading {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn has_more(&self) -> bool {
        self.visible_len() < self.narrowed.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.narrowed.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filters(&self) -> &FilterSelectionSet {
        &self.filters
    }

    pub fn search_term(&self) -> &str {
        &self.raw_term
    }

    pub fn applied_search_term(&self) -> &str {
        self.term.settled()
    }

    pub fn is_search_loading(&self) -> bool {
        self.raw_term != *self.term.settled()
    }

    /// Incremented every time the narrowed collection is rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> BrowseView<'_, R> {
        let records = self.fetch.records();
        let paginated_results = self.narrowed[..self.visible_len()]
            .iter()
            .map(|&i| &records[i])
            .collect();

        BrowseView {
            paginated_results,
            has_more: self.has_more(),
            filtered_count: self.narrowed.len(),
            is_loading: self.fetch.is_loading,
            is_search_loading: self.is_search_loading(),
            search_term: &self.raw_term,
            filters: &self.filters,
            page: self.page,
            error: self.fetch.error.as_deref(),
        }
    }

    fn visible_len(&self) -> usize {
        self.page
            .saturating_mul(self.page_size)
            .min(self.narrowed.len())
    }

    fn recompute(&mut self) {
        let records = self.fetch.records();
        self.narrowed = search_indices(records, self.term.settled())
            .into_iter()
            .filter(|&i| filter::matches(&records[i], &self.filters, self.registry))
            .collect();
        self.generation += 1;
        debug!(
            "Browse results recomputed — term={:?} filters={} matched={} total={}",
            self.term.settled(),
            self.filters.len(),
            self.narrowed.len(),
            records.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterValue;
    use crate::record::Airport;
    use std::sync::Arc;

    fn airport(iata: &str, name: &str) -> Airport {
        Airport {
            iata_code: Some(iata.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn ready(records: Vec<Airport>) -> FetchState<Airport> {
        FetchState::ready(Arc::new(records))
    }

    fn numbered(n: usize) -> Vec<Airport> {
        (0..n)
            .map(|i| Airport {
                iata_code: Some(format!("A{:02}", i)),
                region: Some(if i % 2 == 0 { "Europe" } else { "Asia" }.to_string()),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_exact_code_short_circuits_substring() {
        let records = vec![airport("IST", "Other"), airport("XXX", "Istanbul Sub")];
        let found = search_records(&records, "ist");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].iata_code.as_deref(), Some("IST"));
    }

    #[test]
    fn test_substring_fallback_across_fields() {
        let mut bristol = airport("BRS", "Bristol");
        bristol.country = Some("United Kingdom".into());
        let mut other = airport("LHR", "Heathrow");
        other.icao_code = Some("EGLL".into());
        let records = vec![bristol, other];

        assert_eq!(search_records(&records, "stol").len(), 1);
        assert_eq!(search_records(&records, "kingdom").len(), 1);
        assert_eq!(search_records(&records, "egll").len(), 1);
        assert_eq!(search_records(&records, "  ").len(), 2);
        assert!(search_records(&records, "zzz").is_empty());
    }

    #[test]
    fn test_records_without_fields_do_not_match() {
        let records = vec![Airport::default()];
        assert!(search_records(&records, "a").is_empty());
        assert_eq!(search_records(&records, "").len(), 1);
    }

    #[test]
    fn test_pagination_and_load_more() {
        let mut state = BrowseState::<Airport>::new();
        state.set_fetch_state(ready(numbered(45)));

        let view = state.view();
        assert_eq!(view.paginated_results.len(), 20);
        assert_eq!(view.filtered_count, 45);
        assert!(view.has_more);

        assert!(state.load_more());
        assert_eq!(state.view().paginated_results.len(), 40);
        assert!(state.has_more());

        assert!(state.load_more());
        assert_eq!(state.view().paginated_results.len(), 45);
        assert!(!state.has_more());

        assert!(!state.load_more());
        assert_eq!(state.page(), 3);
    }

    #[test]
    fn test_load_more_blocked_while_loading() {
        let mut state = BrowseState::<Airport>::new();
        let fetch = ready(numbered(45));
        state.set_fetch_state(fetch.refetching());
        assert!(state.has_more());
        assert!(!state.load_more());
        assert_eq!(state.page(), 1);
        assert!(state.view().is_loading);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = BrowseState::<Airport>::new();
        state.set_fetch_state(ready(numbered(100)));
        state.load_more();
        state.load_more();
        assert_eq!(state.page(), 3);

        state.update_filters(|f| {
            f.insert("region".into(), FilterValue::from("europe"));
        });
        assert_eq!(state.page(), 1);
        let view = state.view();
        assert_eq!(view.filtered_count, 50);
        assert_eq!(view.paginated_results.len(), 20);
        assert_eq!(view.paginated_results[0].iata_code.as_deref(), Some("A00"));
    }

    #[test]
    fn test_identical_filters_do_not_recompute() {
        let mut state = BrowseState::<Airport>::new();
        state.set_fetch_state(ready(numbered(10)));
        let before = state.generation();
        state.set_filters(FilterSelectionSet::new());
        assert_eq!(state.generation(), before);
    }

    #[test]
    fn test_debounced_search_recomputes_once() {
        let start = Instant::now();
        let mut state = BrowseState::<Airport>::new();
        state.set_fetch_state(ready(vec![
            airport("IST", "Istanbul Airport"),
            airport("SAW", "Sabiha Gokcen"),
            airport("ESB", "Esenboga"),
        ]));
        let before = state.generation();

        for (ms, text) in [(0, "s"), (120, "sa"), (260, "saw")] {
            state.set_search_term(text, start + Duration::from_millis(ms));
            assert!(!state.tick(start + Duration::from_millis(ms + 10)));
            assert!(state.is_search_loading());
        }
        assert_eq!(state.view().filtered_count, 3);
        assert_eq!(state.view().search_term, "saw");

        assert!(state.tick(start + Duration::from_millis(760)));
        assert!(!state.tick(start + Duration::from_millis(2000)));
        assert_eq!(state.generation(), before + 1);
        assert!(!state.is_search_loading());

        let view = state.view();
        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.paginated_results[0].iata_code.as_deref(), Some("SAW"));
    }

    #[test]
    fn test_search_change_resets_page() {
        let start = Instant::now();
        let mut state = BrowseState::<Airport>::new().with_debounce(Duration::from_millis(10));
        state.set_fetch_state(ready(numbered(60)));
        state.load_more();
        assert_eq!(state.page(), 2);

        state.set_search_term("a0", start);
        state.tick(start + Duration::from_millis(10));
        assert_eq!(state.page(), 1);
        assert_eq!(state.view().filtered_count, 10);
    }

    #[test]
    fn test_error_passes_through() {
        let mut state = BrowseState::<Airport>::new();
        state.set_fetch_state(FetchState::failed(SourceError::InvalidLocale("xx".into())));
        let view = state.view();
        assert!(view.paginated_results.is_empty());
        assert!(matches!(view.error, Some(SourceError::InvalidLocale(_))));
        assert!(!view.has_more);
    }

    #[test]
    fn test_custom_page_size() {
        let mut state = BrowseState::<Airport>::new().with_page_size(7);
        state.set_fetch_state(ready(numbered(10)));
        assert_eq!(state.view().paginated_results.len(), 7);
        state.load_more();
        assert_eq!(state.view().paginated_results.len(), 10);
    }
}
