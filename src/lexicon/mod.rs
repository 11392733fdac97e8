//! The confusability lexicon
//!
//! A [`Lexicon`] maps a two-character string key to the congruence score of
//! that character pair. Every score is written under both key orderings
//! (`"ab"` and `"ba"`), so lookups never care which name contributed which
//! character. Built once by [`builder`], persisted as a single JSON blob,
//! and loaded read-only by the scorer.

pub mod builder;
pub mod export;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading or saving a lexicon
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write lexicon {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("lexicon {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode lexicon: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Character-pair -> congruence score mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    entries: FxHashMap<String, f64>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a score under both orderings of the character pair
    pub fn insert_pair(&mut self, a: char, b: char, score: f64) {
        self.entries.insert(pair_key(a, b), score);
        self.entries.insert(pair_key(b, a), score);
    }

    /// Score for a character pair, if the pair was trained
    pub fn get(&self, a: char, b: char) -> Option<f64> {
        self.entries.get(&pair_key(a, b)).copied()
    }

    /// Score keyed by a raw two-character string
    pub fn get_key(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Number of entries (two per unordered pair)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Load a lexicon from a JSON file.
    ///
    /// A missing or unparsable file is fatal; there is no partial recovery.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LexiconError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist the lexicon as a single JSON file.
    ///
    /// JSON float formatting round-trips `f64` exactly, so
    /// `load(save(lexicon)) == lexicon`.
    pub fn save(&self, path: &Path) -> Result<(), LexiconError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| LexiconError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn pair_key(a: char, b: char) -> String {
    let mut key = String::with_capacity(a.len_utf8() + b.len_utf8());
    key.push(a);
    key.push(b);
    key
}
