//! Glyph loading and character identity
//!
//! Glyph directories hold one raster image per character (any format the
//! `image` crate decodes; the reference corpus is small JPEG crops). Which
//! character a file depicts is resolved in one of two ways:
//!
//! - an explicit TOML manifest mapping file stem -> character (preferred), or
//! - the filename-stem convention: the stem minus every `"1"` substring,
//!   unless the stem IS `"1"`. The `"1"` acts as a collision-avoidance
//!   marker for filesystems that fold case (e.g. `E.jpg` vs `e1.jpg`).

use super::Glyph;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from glyph loading
#[derive(Error, Debug)]
pub enum GlyphError {
    #[error("failed to read glyph directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode glyph image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to read glyph manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse glyph manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("manifest entry '{stem}' maps to '{value}', expected a single character")]
    ManifestEntry { stem: String, value: String },

    #[error("glyph directory {path} holds {found} usable glyphs, need at least 2")]
    NotEnoughGlyphs { path: PathBuf, found: usize },
}

/// Explicit file-stem -> character mapping
#[derive(Debug, Clone, Default)]
pub struct GlyphManifest {
    entries: FxHashMap<String, char>,
}

#[derive(Deserialize)]
struct ManifestFile {
    glyphs: FxHashMap<String, String>,
}

impl GlyphManifest {
    /// Load a manifest from a TOML file with a `[glyphs]` table of
    /// `stem = "character"` entries.
    pub fn load(path: &Path) -> Result<Self, GlyphError> {
        let text = std::fs::read_to_string(path).map_err(|source| GlyphError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: ManifestFile =
            toml::from_str(&text).map_err(|source| GlyphError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut entries = FxHashMap::default();
        for (stem, value) in parsed.glyphs {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    entries.insert(stem, ch);
                }
                _ => {
                    return Err(GlyphError::ManifestEntry { stem, value });
                }
            }
        }
        Ok(Self { entries })
    }

    /// Look up the character for a file stem
    pub fn character_for(&self, stem: &str) -> Option<char> {
        self.entries.get(stem).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve a file stem to the character it depicts.
///
/// Without a manifest, the stem convention applies: every `"1"` substring is
/// stripped unless the stem is exactly `"1"`, and whatever remains must be a
/// single character.
pub fn character_for_stem(stem: &str, manifest: Option<&GlyphManifest>) -> Option<char> {
    if let Some(manifest) = manifest {
        return manifest.character_for(stem);
    }

    let normalized = if stem == "1" {
        stem.to_string()
    } else {
        stem.replace('1', "")
    };

    let mut chars = normalized.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Load a single glyph image as an 8-bit grayscale grid
pub fn load_glyph(path: &Path) -> Result<Glyph, GlyphError> {
    let img = image::open(path)
        .map_err(|source| GlyphError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(Glyph::new(width, height, img.into_raw()))
}

/// File extensions considered glyph images
const GLYPH_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Load every glyph in a directory, resolving character identities.
///
/// Files that fail to decode, or whose stem does not resolve to a single
/// character, are skipped with a warning rather than failing the run.
/// Returns `(character, glyph)` pairs sorted by character.
pub fn load_glyph_set(
    dir: &Path,
    manifest: Option<&GlyphManifest>,
) -> Result<Vec<(char, Glyph)>, GlyphError> {
    let entries = std::fs::read_dir(dir).map_err(|source| GlyphError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut glyphs: Vec<(char, Glyph)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable directory entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();

        let is_glyph = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| GLYPH_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !is_glyph {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("skipping glyph with non-UTF-8 name: {}", path.display());
            continue;
        };

        let Some(character) = character_for_stem(stem, manifest) else {
            warn!(
                "skipping {}: stem '{stem}' does not resolve to a character",
                path.display()
            );
            continue;
        };

        if glyphs.iter().any(|(c, _)| *c == character) {
            warn!(
                "skipping {}: character '{character}' already loaded",
                path.display()
            );
            continue;
        }

        match load_glyph(&path) {
            Ok(glyph) => {
                debug!(
                    "loaded glyph '{character}' from {} ({}x{})",
                    path.display(),
                    glyph.width(),
                    glyph.height()
                );
                glyphs.push((character, glyph));
            }
            Err(e) => {
                warn!("skipping undecodable glyph: {e}");
            }
        }
    }

    if glyphs.len() < 2 {
        return Err(GlyphError::NotEnoughGlyphs {
            path: dir.to_path_buf(),
            found: glyphs.len(),
        });
    }

    glyphs.sort_by_key(|(c, _)| *c);
    Ok(glyphs)
}
