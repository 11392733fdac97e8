//! Glyph congruence: how much two rendered characters can be made to overlap
//!
//! The congruence of a glyph pair is a log-scaled measure of the best
//! achievable ink-on-ink overlap across all integer translations of one
//! glyph over the other, optionally averaged over the four right-angle
//! rotations. Character pairs with high congruence look alike on screen
//! and feed the orthographic lexicon.
//!
//! The translation search is exhaustive: O(W²·H²) per pair. This is the
//! dominant cost of lexicon construction, so glyph sets should be sized
//! accordingly (the reference corpus is digits at ~40x70 pixels).

use super::Glyph;
use thiserror::Error;

/// Errors from congruence scoring
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CongruenceError {
    /// The pair has no ink overlap at any shift, or the overlap swallows the
    /// symmetric difference entirely (identical-shape glyphs). The score
    /// formula is undefined for both, so the pair is reported rather than
    /// scored.
    #[error("degenerate glyph overlap (best overlap {overlap}, denominator {denominator})")]
    DegenerateOverlap { overlap: usize, denominator: i64 },
}

/// Count ink-on-ink coincidences for a single shift `(dx, dy)`.
///
/// For every ink pixel `(x, y)` of `moving`, the pixel `(x + dx, y + dy)` of
/// `reference` is checked when it lies within `reference`'s bounds. Shifting
/// `moving` one way is equivalent to shifting `reference` the other.
pub fn overlap_count(dx: isize, dy: isize, moving: &Glyph, reference: &Glyph) -> usize {
    let mut count = 0;
    for y in 0..moving.height() {
        for x in 0..moving.width() {
            let rx = x as isize + dx;
            let ry = y as isize + dy;
            if rx < 0 || ry < 0 {
                continue;
            }
            let (rx, ry) = (rx as usize, ry as usize);
            if rx >= reference.width() || ry >= reference.height() {
                continue;
            }
            if moving.ink(x, y) && reference.ink(rx, ry) {
                count += 1;
            }
        }
    }
    count
}

/// Maximum overlap across every integer translation of `a` over `b`.
///
/// Shifts range over `dx ∈ [-W, W)`, `dy ∈ [-H, H)` with `W`/`H` taken from
/// `a`, so the search covers every alignment where the glyphs can touch.
pub fn best_overlap(a: &Glyph, b: &Glyph) -> usize {
    let w = a.width() as isize;
    let h = a.height() as isize;

    let mut best = 0;
    for dy in -h..h {
        for dx in -w..w {
            best = best.max(overlap_count(dx, dy, a, b));
        }
    }
    best
}

/// Congruence score for one orientation of the pair.
///
/// With `m` the best overlap and `A`, `B` the ink areas, the score is
/// `log10(10 * m / (A + B - 2m) / 2)`: overlap normalized against the
/// symmetric difference of the two ink masses, log-scaled. Unbounded above
/// and free to go negative for barely-overlapping pairs.
pub fn pair_congruence(a: &Glyph, b: &Glyph) -> Result<f64, CongruenceError> {
    let m = best_overlap(a, b);
    let denominator = (a.area() + b.area()) as i64 - 2 * m as i64;

    if m == 0 || denominator <= 0 {
        return Err(CongruenceError::DegenerateOverlap {
            overlap: m,
            denominator,
        });
    }

    Ok((10.0 * m as f64 / denominator as f64 / 2.0).log10())
}

/// Rotation-averaged congruence: the arithmetic mean of [`pair_congruence`]
/// with `a` at 0, 90, 180 and 270 degrees against a fixed `b`.
///
/// A degenerate score at any rotation fails the whole pair; averaging a
/// sentinel into three finite scores would silently skew the statistic.
pub fn rotated_pair_congruence(a: &Glyph, b: &Glyph) -> Result<f64, CongruenceError> {
    let mut sum = 0.0;
    let mut rotated = a.clone();
    for _ in 0..4 {
        sum += pair_congruence(&rotated, b)?;
        rotated = rotated.rotate90();
    }
    Ok(sum / 4.0)
}
