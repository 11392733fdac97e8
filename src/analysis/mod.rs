//! Pairwise identifier analysis
//!
//! Orchestrates the three similarity axes over every unordered pair of
//! identifiers from one source file:
//!
//! 1. Orthographic: lexicon-backed position-aligned comparison
//! 2. Phonological: edit ratio over phonetic transcriptions
//! 3. Semantic: word vectors, token-by-token for compound names
//!
//! Pairs are independent, so they are scored on a rayon pool; warning
//! collection happens once on the calling thread. A warning fires when a
//! score is strictly above its axis threshold.

use crate::lexicon::Lexicon;
use crate::models::{AnalysisReport, Identifier, SimilarityKind, Warning, WarningSummary};
use crate::scoring::phonological::{self, GraphemeTranscriber, Transcriber};
use crate::scoring::semantic::{self, NullModel, SemanticModel};
use crate::scoring::split::split_identifier;
use crate::scoring::{orthographic, ScoreError};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Per-axis warning thresholds; a warning fires strictly above
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub orthographic: f64,
    pub phonological: f64,
    pub semantic: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            orthographic: 0.45,
            phonological: 0.8,
            semantic: 0.9,
        }
    }
}

/// Pairwise identifier analyzer
///
/// Holds the lexicon and the collaborator backends; the lexicon is loaded
/// once by the caller and passed in, never a process-wide singleton.
pub struct Analyzer {
    lexicon: Lexicon,
    transcriber: Box<dyn Transcriber>,
    model: Box<dyn SemanticModel>,
    thresholds: Thresholds,
}

impl Analyzer {
    /// Analyzer with default backends: grapheme transcription, no semantic
    /// vocabulary
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            transcriber: Box::new(GraphemeTranscriber),
            model: Box::new(NullModel),
            thresholds: Thresholds::default(),
        }
    }

    /// Swap in a pronunciation backend
    pub fn with_transcriber(mut self, transcriber: Box<dyn Transcriber>) -> Self {
        self.transcriber = transcriber;
        self
    }

    /// Swap in a semantic backend
    pub fn with_model(mut self, model: Box<dyn SemanticModel>) -> Self {
        self.model = model;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Score every unordered pair of `identifiers` and collect warnings.
    ///
    /// `occurrences` is the total identifier count before deduplication,
    /// carried through to the report.
    pub fn analyze(
        &self,
        target: &Path,
        identifiers: &[Identifier],
        occurrences: usize,
    ) -> Result<AnalysisReport, ScoreError> {
        // The orthographic formula divides by length; empty names cannot
        // come out of extraction, so reject rather than skip.
        if identifiers.iter().any(|id| id.name.is_empty()) {
            return Err(ScoreError::EmptyIdentifier);
        }

        let tokens: Vec<Vec<String>> = identifiers
            .iter()
            .map(|id| split_identifier(&id.name))
            .collect();

        let mut pairs = Vec::new();
        for i in 0..identifiers.len() {
            for j in (i + 1)..identifiers.len() {
                pairs.push((i, j));
            }
        }
        debug!("scoring {} identifier pairs", pairs.len());

        let warnings: Vec<Warning> = pairs
            .par_iter()
            .map(|&(i, j)| self.score_pair(&identifiers[i], &identifiers[j], &tokens[i], &tokens[j]))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect();

        let summary = WarningSummary::from_warnings(&warnings);
        info!(
            "{}: {} identifiers, {} warnings",
            target.display(),
            identifiers.len(),
            summary.total
        );

        Ok(AnalysisReport {
            target: target.to_path_buf(),
            identifiers_seen: occurrences,
            unique_identifiers: identifiers.len(),
            warnings,
            summary,
        })
    }

    /// Score one pair on all three axes
    fn score_pair(
        &self,
        id1: &Identifier,
        id2: &Identifier,
        tokens1: &[String],
        tokens2: &[String],
    ) -> Result<Vec<Warning>, ScoreError> {
        let mut warnings = Vec::new();

        let orth = orthographic::score(&id1.name, &id2.name, &self.lexicon)?;
        if orth > self.thresholds.orthographic {
            warnings.push(self.warning(SimilarityKind::Orthographic, id1, id2, orth));
        }

        let phon = phonological::score(self.transcriber.as_ref(), &id1.name, &id2.name);
        if phon > self.thresholds.phonological {
            warnings.push(self.warning(SimilarityKind::Phonological, id1, id2, phon));
        }

        // Compound names compare token-by-token; single tokens go straight
        // to the model
        let sem = if tokens1.len() > 1 || tokens2.len() > 1 {
            semantic::compound_score(self.model.as_ref(), tokens1, tokens2)
        } else {
            semantic::token_score(self.model.as_ref(), &id1.name, &id2.name)
        };
        if sem > self.thresholds.semantic {
            warnings.push(self.warning(SimilarityKind::Semantic, id1, id2, sem));
        }

        Ok(warnings)
    }

    fn warning(
        &self,
        kind: SimilarityKind,
        id1: &Identifier,
        id2: &Identifier,
        score: f64,
    ) -> Warning {
        Warning::new(kind, &id1.name, id1.line, &id2.name, id2.line, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::semantic::VectorModel;
    use rustc_hash::FxHashMap;

    fn ids(names: &[(&str, u32)]) -> Vec<Identifier> {
        names.iter().map(|&(n, l)| Identifier::new(n, l)).collect()
    }

    #[test]
    fn test_orthographic_warning_fires_above_threshold() {
        let mut lexicon = Lexicon::new();
        lexicon.insert_pair('E', 'F', 0.97);

        let analyzer = Analyzer::new(lexicon);
        let identifiers = ids(&[("E", 3), ("F", 4)]);
        let report = analyzer
            .analyze(Path::new("test.py"), &identifiers, 2)
            .unwrap();

        assert_eq!(report.summary.orthographic, 1);
        let w = &report.warnings[0];
        assert_eq!(w.kind, SimilarityKind::Orthographic);
        assert_eq!(w.name1, "E");
        assert_eq!(w.line1, 3);
        assert_eq!(w.name2, "F");
        assert_eq!(w.line2, 4);
        assert!((w.score - 0.97).abs() < 1e-12);
    }

    #[test]
    fn test_no_warning_at_or_below_threshold() {
        let mut lexicon = Lexicon::new();
        lexicon.insert_pair('E', 'F', 0.45);

        let analyzer = Analyzer::new(lexicon);
        let identifiers = ids(&[("E", 1), ("F", 2)]);
        let report = analyzer
            .analyze(Path::new("test.py"), &identifiers, 2)
            .unwrap();

        // 0.45 is not strictly above the 0.45 threshold
        assert_eq!(report.summary.total, 0);
    }

    #[test]
    fn test_phonological_warning_via_transcription() {
        let analyzer = Analyzer::new(Lexicon::new());
        // One substitution in six characters: ratio 5/6 > 0.8
        let identifiers = ids(&[("abcdef", 1), ("abcdex", 2)]);
        let report = analyzer
            .analyze(Path::new("test.py"), &identifiers, 2)
            .unwrap();

        assert_eq!(report.summary.phonological, 1);
        assert_eq!(report.warnings[0].kind, SimilarityKind::Phonological);
    }

    #[test]
    fn test_semantic_warning_single_tokens() {
        let mut vectors = FxHashMap::default();
        vectors.insert("count".to_string(), vec![0.2, 0.8]);
        vectors.insert("number".to_string(), vec![0.2, 0.8]);
        let model = VectorModel::from_vectors(vectors);

        let analyzer = Analyzer::new(Lexicon::new()).with_model(Box::new(model));
        let identifiers = ids(&[("count", 1), ("number", 2)]);
        let report = analyzer
            .analyze(Path::new("test.py"), &identifiers, 2)
            .unwrap();

        assert_eq!(report.summary.semantic, 1);
    }

    #[test]
    fn test_semantic_warning_compound_names() {
        let mut vectors = FxHashMap::default();
        vectors.insert("count".to_string(), vec![1.0, 1.0]);
        vectors.insert("number".to_string(), vec![1.0, 1.0]);
        let model = VectorModel::from_vectors(vectors);

        let analyzer = Analyzer::new(Lexicon::new()).with_model(Box::new(model));
        let identifiers = ids(&[("get_count", 1), ("get_number", 2)]);
        let report = analyzer
            .analyze(Path::new("test.py"), &identifiers, 2)
            .unwrap();

        assert_eq!(report.summary.semantic, 1);
        assert_eq!(report.summary.total, 1);
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let analyzer = Analyzer::new(Lexicon::new());
        let identifiers = ids(&[("ok", 1), ("", 2)]);
        assert!(matches!(
            analyzer.analyze(Path::new("test.py"), &identifiers, 2),
            Err(ScoreError::EmptyIdentifier)
        ));
    }

    #[test]
    fn test_report_counts_carry_through() {
        let analyzer = Analyzer::new(Lexicon::new());
        let identifiers = ids(&[("alpha", 1), ("beta", 2), ("gamma", 3)]);
        let report = analyzer
            .analyze(Path::new("prog.py"), &identifiers, 9)
            .unwrap();

        assert_eq!(report.identifiers_seen, 9);
        assert_eq!(report.unique_identifiers, 3);
        assert_eq!(report.target, Path::new("prog.py"));
    }
}
