// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::record::RecordKind;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FavoriteCollection {
    /// IATA codes, uppercased
    #[serde(default)]
    pub airports: BTreeSet<String>,
    #[serde(default)]
    pub airlines: BTreeSet<String>,
}

impl FavoriteCollection {
    fn set(&self, kind: RecordKind) -> &BTreeSet<String> {
        match kind {
            RecordKind::Airport => &self.airports,
            RecordKind::Airline => &self.airlines,
        }
    }

    fn set_mut(&mut self, kind: RecordKind) -> &mut BTreeSet<String> {
        match kind {
            RecordKind::Airport => &mut self.airports,
            RecordKind::Airline => &mut self.airlines,
        }
    }

    pub fn contains(&self, kind: RecordKind, code: &str) -> bool {
        self.set(kind).contains(&normalize(code))
    }

    /// Returns true if the code was newly added.
    pub fn add(&mut self, kind: RecordKind, code: &str) -> bool {
        let code = normalize(code);
        !code.is_empty() && self.set_mut(kind).insert(code)
    }

    pub fn remove(&mut self, kind: RecordKind, code: &str) -> bool {
        self.set_mut(kind).remove(&normalize(code))
    }

    /// Flips membership and returns the new state.
    pub fn toggle(&mut self, kind: RecordKind, code: &str) -> bool {
        if self.remove(kind, code) {
            false
        } else {
            self.add(kind, code)
        }
    }

    pub fn codes(&self, kind: RecordKind) -> impl Iterator<Item = &str> {
        self.set(kind).iter().map(String::as_str)
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Debug, Clone)]
pub struct FavoritesManager {
    config_path: PathBuf,
}

impl FavoritesManager {
    pub fn new() -> Self {
        Self::at(crate::get_config_root().join("favorites.json"))
    }

    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<FavoriteCollection> {
        if !self.config_path.exists() {
            return Ok(FavoriteCollection::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read favorites.json")?;

        serde_json::from_str(&content).context("Failed to parse favorites.json")
    }

    pub fn save(&self, collection: &FavoriteCollection) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(collection).context("Failed to serialize favorites")?;

        fs::write(&self.config_path, content).context("Failed to write favorites.json")
    }
}

impl Default for FavoritesManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_normalizes_codes() {
        let mut favs = FavoriteCollection::default();
        assert!(favs.toggle(RecordKind::Airport, " ist "));
        assert!(favs.contains(RecordKind::Airport, "IST"));
        assert!(!favs.contains(RecordKind::Airline, "IST"));
        assert!(!favs.toggle(RecordKind::Airport, "Ist"));
        assert!(!favs.contains(RecordKind::Airport, "IST"));
        assert!(!favs.add(RecordKind::Airline, "   "));
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FavoritesManager::at(dir.path().join("sub").join("favorites.json"));

        assert_eq!(manager.load().unwrap(), FavoriteCollection::default());

        let mut favs = FavoriteCollection::default();
        favs.add(RecordKind::Airport, "saw");
        favs.add(RecordKind::Airline, "tk");
        manager.save(&favs).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, favs);
        assert_eq!(loaded.codes(RecordKind::Airline).collect::<Vec<_>>(), vec!["TK"]);
    }
}
