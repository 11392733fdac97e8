//! CLI command definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use doppel::analysis::{Analyzer, Thresholds};
use doppel::config::Config;
use doppel::extract;
use doppel::glyph::GlyphManifest;
use doppel::lexicon::builder::{build_lexicon, BuildOptions};
use doppel::lexicon::{export, Lexicon};
use doppel::reporters::{self, OutputFormat};
use doppel::scoring::orthographic;
use doppel::scoring::semantic::VectorModel;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Doppel - confusable-identifier checker
///
/// 100% LOCAL - no data leaves your machine.
#[derive(Parser, Debug)]
#[command(name = "doppel")]
#[command(
    version,
    about = "Flag identifier names that look, sound, or mean alike",
    long_about = "Doppel checks the identifiers of a source file pairwise on three axes:\n\
orthographic (the rendered characters look alike, backed by a glyph-congruence\n\
lexicon built from font images), phonological (the names sound alike), and\n\
semantic (the names mean alike).\n\n\
Build the lexicon once per font, then analyze as many files as you like.",
    after_help = "\
Examples:
  doppel lexicon build fonts/consolas -o letter_lexicon.json
  doppel lexicon export letter_lexicon.json -o lexicon.csv
  doppel analyze program.py --lexicon letter_lexicon.json
  doppel analyze program.py --format json -o warnings.json
  doppel score E F --lexicon letter_lexicon.json"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build or export the glyph-congruence lexicon
    #[command(subcommand)]
    Lexicon(LexiconCommands),

    /// Analyze a source file for confusable identifier pairs
    Analyze {
        /// Python source file to analyze
        target: PathBuf,

        /// Lexicon artifact (overrides doppel.toml)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Word-vector table for the semantic axis (overrides doppel.toml)
        #[arg(long)]
        vectors: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Warn when orthographic similarity exceeds this
        #[arg(long)]
        orthographic_threshold: Option<f64>,

        /// Warn when phonological similarity exceeds this
        #[arg(long)]
        phonological_threshold: Option<f64>,

        /// Warn when semantic similarity exceeds this
        #[arg(long)]
        semantic_threshold: Option<f64>,
    },

    /// Score one identifier pair orthographically and print the score
    Score {
        name1: String,
        name2: String,

        /// Lexicon artifact
        #[arg(long)]
        lexicon: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum LexiconCommands {
    /// Build a lexicon from a directory of glyph images
    Build {
        /// Directory with one image per character
        glyph_dir: PathBuf,

        /// Where to write the lexicon
        #[arg(long, short = 'o', default_value = "letter_lexicon.json")]
        output: PathBuf,

        /// TOML manifest mapping file stems to characters
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Number of parallel workers (1-64)
        #[arg(long, default_value = "8", value_parser = parse_workers)]
        workers: usize,

        /// Also write the delimited export here
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Export a lexicon to delimited text for inspection
    Export {
        /// Lexicon artifact to export
        lexicon: PathBuf,

        /// Where to write the delimited file
        #[arg(long, short = 'o', default_value = "lexicon.csv")]
        output: PathBuf,
    },
}

/// Dispatch the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Lexicon(command) => run_lexicon(command),
        Commands::Analyze {
            target,
            lexicon,
            vectors,
            format,
            output,
            orthographic_threshold,
            phonological_threshold,
            semantic_threshold,
        } => run_analyze(
            &target,
            lexicon.as_deref(),
            vectors.as_deref(),
            &format,
            output.as_deref(),
            (
                orthographic_threshold,
                phonological_threshold,
                semantic_threshold,
            ),
        ),
        Commands::Score {
            name1,
            name2,
            lexicon,
        } => run_score(&name1, &name2, &lexicon),
    }
}

fn run_lexicon(command: LexiconCommands) -> Result<()> {
    match command {
        LexiconCommands::Build {
            glyph_dir,
            output,
            manifest,
            workers,
            csv,
        } => {
            let manifest = match manifest {
                Some(path) => Some(GlyphManifest::load(&path)?),
                None => None,
            };

            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::with_template("{bar:40} {pos}/{len} pairs {elapsed}")
                    .context("bad progress template")?,
            );
            let progress_bar = bar.clone();
            let options = BuildOptions::new().with_workers(workers).with_progress(
                Box::new(move |done, total| {
                    if progress_bar.length() == Some(0) {
                        progress_bar.set_length(total as u64);
                    }
                    progress_bar.set_position(done as u64);
                }),
            );

            let (lexicon, stats) = build_lexicon(&glyph_dir, manifest.as_ref(), &options)?;
            bar.finish_and_clear();

            lexicon.save(&output)?;
            if let Some(csv_path) = csv {
                export::write_csv(&lexicon, &csv_path)?;
            }

            println!(
                "Wrote {} ({})",
                output.display(),
                stats.summary()
            );
            Ok(())
        }
        LexiconCommands::Export { lexicon, output } => {
            let lexicon = Lexicon::load(&lexicon)?;
            export::write_csv(&lexicon, &output)?;
            println!("Wrote {} ({} entries)", output.display(), lexicon.len());
            Ok(())
        }
    }
}

fn run_analyze(
    target: &Path,
    lexicon_flag: Option<&Path>,
    vectors_flag: Option<&Path>,
    format: &str,
    output: Option<&Path>,
    threshold_flags: (Option<f64>, Option<f64>, Option<f64>),
) -> Result<()> {
    let config_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::load_from(&config_dir);

    // Flags win over doppel.toml
    let mut thresholds = config.thresholds;
    if let Some(t) = threshold_flags.0 {
        thresholds.orthographic = t;
    }
    if let Some(t) = threshold_flags.1 {
        thresholds.phonological = t;
    }
    if let Some(t) = threshold_flags.2 {
        thresholds.semantic = t;
    }

    let lexicon = match lexicon_flag.or(config.lexicon.path.as_deref()) {
        Some(path) => Lexicon::load(path)?,
        None => {
            warn!("no lexicon configured; orthographic scores count exact matches only");
            Lexicon::new()
        }
    };

    let mut analyzer = Analyzer::new(lexicon).with_thresholds(thresholds);
    if let Some(path) = vectors_flag.or(config.semantic.vectors.as_deref()) {
        analyzer = analyzer.with_model(Box::new(VectorModel::load(path)?));
    }

    let extraction = extract::extract_identifiers(target)?;
    let report = analyzer.analyze(target, &extraction.identifiers, extraction.occurrences)?;

    let rendered = reporters::report(&report, OutputFormat::from_str(format)?)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn run_score(name1: &str, name2: &str, lexicon_path: &Path) -> Result<()> {
    let lexicon = Lexicon::load(lexicon_path)?;
    let score = orthographic::score(name1, name2, &lexicon)?;
    println!("{score}");
    Ok(())
}
