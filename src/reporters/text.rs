//! Text (terminal) reporter with colors and formatting

use crate::models::{AnalysisReport, SimilarityKind, Warning};
use anyhow::Result;

/// Axis colors (ANSI escape codes)
fn kind_color(kind: SimilarityKind) -> &'static str {
    match kind {
        SimilarityKind::Orthographic => "\x1b[33m", // Yellow
        SimilarityKind::Phonological => "\x1b[36m", // Cyan
        SimilarityKind::Semantic => "\x1b[35m",     // Magenta
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{BOLD}Doppel Analysis{RESET}  {DIM}{}{RESET}\n",
        report.target.display()
    ));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Identifiers: {} seen, {} unique  Warnings: {BOLD}{}{RESET}\n",
        report.identifiers_seen, report.unique_identifiers, report.summary.total
    ));

    for kind in [
        SimilarityKind::Orthographic,
        SimilarityKind::Phonological,
        SimilarityKind::Semantic,
    ] {
        let axis: Vec<&Warning> = report.warnings.iter().filter(|w| w.kind == kind).collect();
        let color = kind_color(kind);
        out.push_str(&format!(
            "\n{color}{BOLD}{kind} similarity{RESET} ({})\n",
            axis.len()
        ));
        for w in axis {
            out.push_str(&format!(
                "  [{}] on line {} and [{}] on line {} are {:.2} similar\n",
                w.name1, w.line1, w.name2, w.line2, w.score
            ));
        }
    }

    if report.summary.total == 0 {
        out.push_str(&format!("\n{DIM}No confusable identifier pairs.{RESET}\n"));
    } else {
        out.push_str(&format!(
            "\n{DIM}Rename one side of each pair to keep readers honest.{RESET}\n"
        ));
    }

    Ok(out)
}
