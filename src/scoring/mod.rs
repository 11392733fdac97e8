//! Similarity scorers
//!
//! One submodule per axis:
//! - `orthographic` - do the names *look* alike (lexicon-backed)
//! - `phonological` - do the names *sound* alike (transcription + edit ratio)
//! - `semantic` - do the names *mean* alike (word vectors)
//! - `split` - compound-name splitting shared by the higher axes

pub mod orthographic;
pub mod phonological;
pub mod semantic;
pub mod split;

use thiserror::Error;

/// Errors from similarity scoring
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The scoring formula divides by identifier length; callers must
    /// validate before invoking.
    #[error("cannot score an empty identifier")]
    EmptyIdentifier,
}
