//! Doppel - confusable-identifier checker
//!
//! A local-first analysis tool that flags identifier names a reader could
//! mistake for one another: orthographically (the rendered characters look
//! alike), phonologically (the names sound alike), and semantically (the
//! names mean alike).
//!
//! The orthographic axis is backed by a glyph-congruence lexicon built
//! offline from rendered character images; everything else consumes that
//! lexicon read-only.

pub mod analysis;
pub mod config;
pub mod extract;
pub mod glyph;
pub mod lexicon;
pub mod models;
pub mod reporters;
pub mod scoring;
