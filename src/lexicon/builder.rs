//! Offline lexicon construction
//!
//! Builds the confusability lexicon from a directory of glyph images. Every
//! unordered pair of glyphs is scored independently, so the work runs as a
//! producer-consumer pipeline:
//!
//! ```text
//!   producer ──(pair indices)──> worker 1..N ──(scores)──> consumer
//! ```
//!
//! Workers share the decoded glyph set immutably and never talk to each
//! other. The consumer is the single writer: it merges each score into the
//! lexicon under both key orderings and drives the progress callback.
//! Degenerate pairs and unreadable glyph files are skipped with a warning
//! instead of aborting the run.

use super::Lexicon;
use crate::glyph::congruence::rotated_pair_congruence;
use crate::glyph::{load_glyph_set, GlyphError, GlyphManifest};
use crossbeam_channel::bounded;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Progress callback: `(pairs_done, pairs_total)`
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Options for a lexicon build
pub struct BuildOptions {
    /// Worker thread count
    pub workers: usize,
    /// Called after each pair completes
    pub progress: Option<ProgressCallback>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(4, |n| n.get()),
            progress: None,
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }
}

/// Statistics from a lexicon build
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Glyphs loaded from the directory
    pub glyphs: usize,
    /// Unordered pairs enumerated
    pub pairs_total: usize,
    /// Pairs scored into the lexicon
    pub pairs_scored: usize,
    /// Pairs skipped as degenerate
    pub pairs_skipped: usize,
}

impl BuildStats {
    /// One-line human summary
    pub fn summary(&self) -> String {
        format!(
            "{} glyphs, {} pairs scored, {} skipped",
            self.glyphs, self.pairs_scored, self.pairs_skipped
        )
    }
}

/// Build a lexicon from every unordered glyph pair in `dir`.
///
/// Character identity comes from `manifest` when given, otherwise from the
/// filename-stem convention. The returned lexicon is symmetric: each scored
/// pair appears under both key orderings.
pub fn build_lexicon(
    dir: &Path,
    manifest: Option<&GlyphManifest>,
    options: &BuildOptions,
) -> Result<(Lexicon, BuildStats), GlyphError> {
    let glyphs = Arc::new(load_glyph_set(dir, manifest)?);
    let n = glyphs.len();
    let pairs_total = n * (n - 1) / 2;

    info!(
        "building lexicon from {} glyphs ({} pairs) with {} workers",
        n, pairs_total, options.workers
    );

    let (work_tx, work_rx) = bounded::<(usize, usize)>(options.workers * 2);
    let (result_tx, result_rx) = bounded::<PairOutcome>(options.workers * 2);

    // Producer: feeds pair indices; blocks when workers lag (backpressure)
    let producer = thread::spawn(move || {
        for i in 0..n {
            for j in (i + 1)..n {
                if work_tx.send((i, j)).is_err() {
                    return;
                }
            }
        }
    });

    // Workers: score pairs independently, no shared mutable state
    let mut worker_handles = Vec::with_capacity(options.workers);
    for _ in 0..options.workers {
        let work_rx = work_rx.clone();
        let result_tx = result_tx.clone();
        let glyphs = Arc::clone(&glyphs);
        worker_handles.push(thread::spawn(move || {
            while let Ok((i, j)) = work_rx.recv() {
                let (char_a, glyph_a) = &glyphs[i];
                let (char_b, glyph_b) = &glyphs[j];
                let outcome = PairOutcome {
                    char_a: *char_a,
                    char_b: *char_b,
                    score: rotated_pair_congruence(glyph_a, glyph_b),
                };
                if result_tx.send(outcome).is_err() {
                    return;
                }
            }
        }));
    }
    // The consumer loop below must see the channel close once workers finish
    drop(work_rx);
    drop(result_tx);

    // Consumer: the single writer merging scores into the lexicon
    let mut lexicon = Lexicon::new();
    let mut stats = BuildStats {
        glyphs: n,
        pairs_total,
        ..Default::default()
    };
    let mut done = 0;
    for outcome in result_rx.iter() {
        done += 1;
        match outcome.score {
            Ok(score) => {
                lexicon.insert_pair(outcome.char_a, outcome.char_b, score);
                stats.pairs_scored += 1;
            }
            Err(e) => {
                warn!(
                    "skipping pair '{}{}': {e}",
                    outcome.char_a, outcome.char_b
                );
                stats.pairs_skipped += 1;
            }
        }
        if let Some(callback) = &options.progress {
            callback(done, pairs_total);
        }
    }

    if producer.join().is_err() {
        warn!("lexicon producer thread panicked");
    }
    for handle in worker_handles {
        if handle.join().is_err() {
            warn!("lexicon worker thread panicked");
        }
    }

    info!("lexicon build complete: {}", stats.summary());
    Ok((lexicon, stats))
}

/// One scored pair flowing from a worker to the consumer
struct PairOutcome {
    char_a: char,
    char_b: char,
    score: Result<f64, crate::glyph::congruence::CongruenceError>,
}
