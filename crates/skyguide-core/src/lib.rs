pub mod browse;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod favorites;
pub mod filter;
pub mod range;
pub mod record;
pub mod registry;
pub mod source;

pub use browse::{search_records, BrowseState, BrowseView, PAGE_SIZE};
pub use filter::{filter_records, matches, FilterSelectionSet, FilterValue};
pub use range::{parse_range, FilterRange};
pub use record::{Airline, Airport, BrowseRecord, RecordKind};
pub use registry::Filterable;
pub use source::{CachedSource, FetchState, JsonDirSource, Locale, RecordSource, SourceError};

use std::path::PathBuf;

/// Per-user configuration directory (config, favorites).
/// `SKYGUIDE_CONFIG_DIR` overrides the platform default.
pub fn get_config_root() -> PathBuf {
    if let Some(dir) = std::env::var_os("SKYGUIDE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    directories::ProjectDirs::from("org", "skyguide", "SkyGuide")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".skyguide"))
}

/// Loads the full collection for `locale` from a data directory and runs
/// it through a fresh browse state.
pub fn open_browser<R>(data_dir: &std::path::Path, locale: &Locale) -> BrowseState<R>
where
    R: Filterable + source::Dataset,
{
    let mut cache: CachedSource<JsonDirSource, R> =
        CachedSource::new(JsonDirSource::new(data_dir));
    let mut state = BrowseState::new();
    state.set_fetch_state(cache.load(locale));
    state
}
