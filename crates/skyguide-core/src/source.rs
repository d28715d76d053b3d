// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Record collections, fetched once per locale.

use crate::record::{Airline, Airport};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_LOCALE: &str = "en";

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid dataset {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    #[error("No {dataset} dataset under {root}")]
    NotFound { dataset: &'static str, root: PathBuf },
}

/// A language tag such as `en`, `tr` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Accepts 2-3 ASCII letters with an optional `-REGION` suffix.
    /// The language part is lowercased, the region uppercased.
    pub fn parse(tag: &str) -> Result<Self, SourceError> {
        let tag = tag.trim().replace('_', "-");
        let mut parts = tag.splitn(2, '-');
        let lang = parts.next().unwrap_or_default();
        if !(2..=3).contains(&lang.len()) || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SourceError::InvalidLocale(tag.clone()));
        }
        let mut normalized = lang.to_ascii_lowercase();
        if let Some(region) = parts.next() {
            if region.is_empty() || !region.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(SourceError::InvalidLocale(tag.clone()));
            }
            normalized.push('-');
            normalized.push_str(&region.to_ascii_uppercase());
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `pt-BR` -> `pt`
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dataset file a record type is stored in.
pub trait Dataset: DeserializeOwned {
    const FILE_NAME: &'static str;
    const LABEL: &'static str;
}

impl Dataset for Airport {
    const FILE_NAME: &'static str = "airports.json";
    const LABEL: &'static str = "airport";
}

impl Dataset for Airline {
    const FILE_NAME: &'static str = "airlines.json";
    const LABEL: &'static str = "airline";
}

/// Anything that can produce the full collection for a locale.
pub trait RecordSource<R> {
    fn fetch(&self, locale: &Locale) -> Result<Vec<R>, SourceError>;

    /// Modification time of the backing data, if the source can tell.
    /// Used by [`CachedSource`] to invalidate stale entries.
    fn modified(&self, _locale: &Locale) -> Option<DateTime<Utc>> {
        None
    }
}

/// Reads `<root>/<locale>/<dataset>.json`, falling back to the language
/// (`pt-BR` -> `pt`) and then to the default locale.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First existing dataset file for `locale`.
    pub fn resolve(&self, locale: &Locale, file_name: &str) -> Option<PathBuf> {
        self.locate(locale, file_name).map(|(path, _)| path)
    }

    fn locate<'l>(&self, locale: &'l Locale, file_name: &str) -> Option<(PathBuf, &'l str)> {
        let mut candidates = vec![locale.as_str(), locale.language()];
        candidates.push(DEFAULT_LOCALE);
        candidates.dedup();

        candidates.into_iter().find_map(|candidate| {
            let path = self.root.join(candidate).join(file_name);
            path.is_file().then_some((path, candidate))
        })
    }
}

impl<R: Dataset> RecordSource<R> for JsonDirSource {
    fn fetch(&self, locale: &Locale) -> Result<Vec<R>, SourceError> {
        let (path, used) =
            self.locate(locale, R::FILE_NAME)
                .ok_or_else(|| SourceError::NotFound {
                    dataset: R::LABEL,
                    root: self.root.clone(),
                })?;
        if used != locale.as_str() {
            warn!(
                "Dataset missing for locale; using fallback — locale={} fallback={} file={}",
                locale,
                used,
                R::FILE_NAME
            );
        }

        let content = fs::read_to_string(&path)?;
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&content).map_err(|source| SourceError::Json {
                path: path.clone(),
                source,
            })?;

        let total = entries.len();
        let records: Vec<R> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(
                        "Skipping unreadable {} record — index={} error={} path={}",
                        R::LABEL,
                        i,
                        e,
                        path.display()
                    );
                    None
                }
            })
            .collect();

        info!(
            "Loaded {} dataset — locale={} records={} skipped={} path={}",
            R::LABEL,
            locale,
            records.len(),
            total - records.len(),
            path.display()
        );
        Ok(records)
    }

    fn modified(&self, locale: &Locale) -> Option<DateTime<Utc>> {
        let path = self.resolve(locale, R::FILE_NAME)?;
        let mtime = fs::metadata(path).ok()?.modified().ok()?;
        Some(mtime.into())
    }
}

struct CacheEntry<R> {
    mtime: Option<DateTime<Utc>>,
    records: Arc<Vec<R>>,
}

/// Fetches each locale once and serves the shared snapshot afterwards,
/// refetching only when the source reports a newer modification time.
pub struct CachedSource<S, R> {
    source: S,
    entries: HashMap<Locale, CacheEntry<R>>,
}

impl<S: RecordSource<R>, R> CachedSource<S, R> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, locale: &Locale) -> Result<Arc<Vec<R>>, SourceError> {
        let mtime = self.source.modified(locale);
        if let Some(entry) = self.entries.get(locale) {
            if entry.mtime == mtime {
                debug!("Dataset cache hit — locale={}", locale);
                return Ok(Arc::clone(&entry.records));
            }
            debug!("Dataset changed on disk; refetching — locale={}", locale);
        }

        let records = Arc::new(self.source.fetch(locale)?);
        self.entries.insert(
            locale.clone(),
            CacheEntry {
                mtime,
                records: Arc::clone(&records),
            },
        );
        Ok(records)
    }

    /// Runs a fetch and packages the outcome the way a browse screen consumes it.
    pub fn load(&mut self, locale: &Locale) -> FetchState<R> {
        match self.get(locale) {
            Ok(records) => FetchState::ready(records),
            Err(e) => FetchState::failed(e),
        }
    }

    pub fn invalidate(&mut self, locale: &Locale) {
        self.entries.remove(locale);
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Snapshot of an external fetch: the data if any, whether a (re)load is in
/// flight, and the error from the last attempt, passed through untouched.
pub struct FetchState<R> {
    pub data: Option<Arc<Vec<R>>>,
    pub is_loading: bool,
    pub error: Option<Arc<SourceError>>,
}

impl<R> FetchState<R> {
    pub fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
        }
    }

    pub fn ready(records: Arc<Vec<R>>) -> Self {
        Self {
            data: Some(records),
            is_loading: false,
            error: None,
        }
    }

    pub fn failed(error: SourceError) -> Self {
        Self {
            data: None,
            is_loading: false,
            error: Some(Arc::new(error)),
        }
    }

    /// Keeps the current data visible while a refetch is running.
    pub fn refetching(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: true,
            error: None,
        }
    }

    pub fn records(&self) -> &[R] {
        self.data.as_deref().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<R> Default for FetchState<R> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<R> Clone for FetchState<R> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }
}
