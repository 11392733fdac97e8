//! Project configuration
//!
//! Loads optional per-project settings from a `doppel.toml` next to the
//! analyzed code. Everything has a default; a malformed file warns and
//! falls back rather than failing the run.
//!
//! # Configuration format
//!
//! ```toml
//! # doppel.toml
//!
//! [thresholds]
//! orthographic = 0.45
//! phonological = 0.8
//! semantic = 0.9
//!
//! [lexicon]
//! path = "letter_lexicon.json"
//!
//! [semantic]
//! vectors = "vectors.json"
//! ```

use crate::analysis::Thresholds;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file name looked up in the working directory
pub const CONFIG_FILE: &str = "doppel.toml";

/// Top-level doppel.toml contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub lexicon: LexiconConfig,
    pub semantic: SemanticConfig,
}

/// `[lexicon]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Lexicon artifact to load for orthographic scoring
    pub path: Option<PathBuf>,
}

/// `[semantic]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SemanticConfig {
    /// Word-vector table for the semantic axis
    pub vectors: Option<PathBuf>,
}

impl Config {
    /// Load `doppel.toml` from `dir`, defaulting on absence or parse errors
    pub fn load_from(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let Ok(text) = std::fs::read_to_string(&path) else {
            debug!("no {} found, using defaults", CONFIG_FILE);
            return Self::default();
        };

        match toml::from_str(&text) {
            Ok(config) => {
                debug!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("ignoring malformed {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path());
        assert_eq!(config.thresholds, Thresholds::default());
        assert!(config.lexicon.path.is_none());
        assert!(config.semantic.vectors.is_none());
    }

    #[test]
    fn test_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[thresholds]\northographic = 0.6\n\n[lexicon]\npath = \"lex.json\"\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path());
        assert_eq!(config.thresholds.orthographic, 0.6);
        // Unset fields keep their defaults
        assert_eq!(config.thresholds.phonological, 0.8);
        assert_eq!(config.lexicon.path, Some(PathBuf::from("lex.json")));
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "thresholds = [broken").unwrap();

        let config = Config::load_from(dir.path());
        assert_eq!(config.thresholds, Thresholds::default());
    }
}
