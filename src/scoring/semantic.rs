//! Semantic similarity of identifier names
//!
//! The [`SemanticModel`] trait is the seam for any meaning backend — a
//! lexical ontology, an embedding service, or the bundled [`VectorModel`],
//! which reads a precomputed word -> vector table from JSON and compares
//! words by cosine similarity. Words missing from the table score 0.
//!
//! Compound names are compared token-by-token with [`compound_score`]:
//! position-aligned like the orthographic scorer, but over sub-tokens, with
//! each unmatched trailing token of the longer name diluting the average.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a vector model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read vector model {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("vector model {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Scores the similarity of two word tokens in [0, 1]
pub trait SemanticModel: Send + Sync {
    fn similarity(&self, word1: &str, word2: &str) -> f64;
}

/// Word-vector table with cosine similarity
#[derive(Debug, Clone, Default)]
pub struct VectorModel {
    vectors: FxHashMap<String, Vec<f32>>,
}

impl VectorModel {
    /// Load a `{"word": [f32, ...]}` table from JSON
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vectors: FxHashMap<String, Vec<f32>> =
            serde_json::from_str(&text).map_err(|source| ModelError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { vectors })
    }

    /// Build a model from in-memory vectors
    pub fn from_vectors(vectors: FxHashMap<String, Vec<f32>>) -> Self {
        Self { vectors }
    }

    /// Number of words in the table
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Whether the table has a vector for `word`
    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }
}

impl SemanticModel for VectorModel {
    fn similarity(&self, word1: &str, word2: &str) -> f64 {
        match (self.vectors.get(word1), self.vectors.get(word2)) {
            (Some(v1), Some(v2)) => cosine(v1, v2).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

/// A model with no vocabulary: everything scores 0. Useful when running
/// without a trained table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullModel;

impl SemanticModel for NullModel {
    fn similarity(&self, _word1: &str, _word2: &str) -> f64 {
        0.0
    }
}

/// Cosine similarity of two vectors; 0 for mismatched or zero-norm inputs
fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Semantic similarity of two single tokens, case-folded
pub fn token_score<M: SemanticModel + ?Sized>(model: &M, token1: &str, token2: &str) -> f64 {
    let t1 = token1.to_lowercase();
    let t2 = token2.to_lowercase();
    if t1 == t2 {
        return 1.0;
    }
    model.similarity(&t1, &t2)
}

/// Semantic similarity of two compound names, compared token-by-token.
///
/// Tokens are zipped to the shorter token count; equal tokens score 1,
/// differing tokens ask the model. The sum is divided by the longer token
/// count, so trailing unmatched tokens dilute the result.
pub fn compound_score<M: SemanticModel + ?Sized>(
    model: &M,
    tokens1: &[String],
    tokens2: &[String],
) -> f64 {
    let shorter = tokens1.len().min(tokens2.len());
    let longer = tokens1.len().max(tokens2.len());
    if longer == 0 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..shorter {
        sum += token_score(model, &tokens1[i], &tokens2[i]);
    }
    sum / (shorter + (longer - shorter)) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(entries: &[(&str, Vec<f32>)]) -> VectorModel {
        let mut vectors = FxHashMap::default();
        for (word, vec) in entries {
            vectors.insert((*word).to_string(), vec.clone());
        }
        VectorModel::from_vectors(vectors)
    }

    #[test]
    fn test_cosine_of_identical_vectors_is_one() {
        let model = model_with(&[("count", vec![1.0, 2.0, 3.0]), ("number", vec![1.0, 2.0, 3.0])]);
        let s = model.similarity("count", "number");
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_of_orthogonal_vectors_is_zero() {
        let model = model_with(&[("up", vec![1.0, 0.0]), ("right", vec![0.0, 1.0])]);
        assert_eq!(model.similarity("up", "right"), 0.0);
    }

    #[test]
    fn test_unknown_word_scores_zero() {
        let model = model_with(&[("count", vec![1.0, 0.0])]);
        assert_eq!(model.similarity("count", "mystery"), 0.0);
    }

    #[test]
    fn test_token_score_exact_match_bypasses_model() {
        // Equal tokens score 1 even with no vocabulary at all
        assert_eq!(token_score(&NullModel, "Total", "total"), 1.0);
        assert_eq!(token_score(&NullModel, "total", "item"), 0.0);
    }

    #[test]
    fn test_compound_score_identical_names() {
        let tokens: Vec<String> = vec!["get".into(), "count".into()];
        assert_eq!(compound_score(&NullModel, &tokens, &tokens), 1.0);
    }

    #[test]
    fn test_compound_score_dilutes_extra_tokens() {
        let a: Vec<String> = vec!["get".into(), "count".into()];
        let b: Vec<String> = vec!["get".into(), "count".into(), "fast".into()];
        // Two matches over three token slots
        assert!((compound_score(&NullModel, &a, &b) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_compound_score_uses_model_for_mismatches() {
        let model = model_with(&[("count", vec![1.0, 1.0]), ("number", vec![1.0, 1.0])]);
        let a: Vec<String> = vec!["get".into(), "count".into()];
        let b: Vec<String> = vec!["get".into(), "number".into()];
        let s = compound_score(&model, &a, &b);
        assert!((s - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vector_model_round_trips_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.json");
        std::fs::write(&path, r#"{"left": [0.1, 0.9], "right": [0.1, 0.9]}"#).unwrap();

        let model = VectorModel::load(&path).unwrap();
        assert_eq!(model.len(), 2);
        assert!(model.contains("left"));
        assert!((model.similarity("left", "right") - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_corrupt_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.json");
        std::fs::write(&path, "[not a table]").unwrap();
        assert!(matches!(
            VectorModel::load(&path),
            Err(ModelError::Corrupt { .. })
        ));
    }
}
