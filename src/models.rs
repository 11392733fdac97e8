//! Core data models for Doppel
//!
//! These models are used throughout the codebase for representing
//! identifiers, similarity warnings, and analysis results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Generate a deterministic warning ID based on content hash.
///
/// Stable IDs let findings be tracked across runs and suppressed by ID.
/// The ID is a 16-character hex string derived from hashing the similarity
/// axis and both identifier names.
pub fn deterministic_warning_id(kind: SimilarityKind, name1: &str, name2: &str) -> String {
    // MD5 keeps the hash stable across Rust versions; DefaultHasher does not.
    let input = format!("{kind}\n{name1}\n{name2}");
    let digest = md5::compute(input.as_bytes());
    format!("{:x}", digest)[..16].to_string()
}

/// The three similarity axes a pair of names is checked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityKind {
    Orthographic,
    Phonological,
    Semantic,
}

impl std::fmt::Display for SimilarityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimilarityKind::Orthographic => write!(f, "orthographic"),
            SimilarityKind::Phonological => write!(f, "phonological"),
            SimilarityKind::Semantic => write!(f, "semantic"),
        }
    }
}

/// An identifier occurrence: the name and the line it first appears on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub line: u32,
}

impl Identifier {
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// A confusable-pair warning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub id: String,
    pub kind: SimilarityKind,
    pub name1: String,
    pub line1: u32,
    pub name2: String,
    pub line2: u32,
    /// Similarity score on the axis that fired
    pub score: f64,
}

impl Warning {
    pub fn new(
        kind: SimilarityKind,
        name1: impl Into<String>,
        line1: u32,
        name2: impl Into<String>,
        line2: u32,
        score: f64,
    ) -> Self {
        let name1 = name1.into();
        let name2 = name2.into();
        let id = deterministic_warning_id(kind, &name1, &name2);
        Self {
            id,
            kind,
            name1,
            line1,
            name2,
            line2,
            score,
        }
    }
}

/// Warning counts by similarity axis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarningSummary {
    pub orthographic: usize,
    pub phonological: usize,
    pub semantic: usize,
    pub total: usize,
}

impl WarningSummary {
    pub fn from_warnings(warnings: &[Warning]) -> Self {
        let mut summary = Self::default();
        for w in warnings {
            match w.kind {
                SimilarityKind::Orthographic => summary.orthographic += 1,
                SimilarityKind::Phonological => summary.phonological += 1,
                SimilarityKind::Semantic => summary.semantic += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Full result of analyzing one source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub target: PathBuf,
    pub identifiers_seen: usize,
    pub unique_identifiers: usize,
    pub warnings: Vec<Warning>,
    pub summary: WarningSummary,
}
