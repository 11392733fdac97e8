//! Tabular lexicon export
//!
//! Writes the lexicon as a plain-text delimited file for eyeballing in a
//! spreadsheet. One row per entry (so each unordered pair appears twice,
//! once per ordering). Nothing in the toolchain reads this back.

use super::{Lexicon, LexiconError};
use std::path::Path;

/// Column header of the export file
const HEADER: &str = "character #1, character #2, similarity";

/// Render the lexicon as delimited text, rows sorted by key
pub fn to_csv(lexicon: &Lexicon) -> String {
    let mut rows: Vec<(&str, f64)> = lexicon.iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::from(HEADER);
    for (key, score) in rows {
        let mut chars = key.chars();
        let first = chars.next().unwrap_or('?');
        let second = chars.next().unwrap_or('?');
        out.push_str(&format!("\n{first}, {second}, {score}"));
    }
    out
}

/// Write the delimited export next to the lexicon artifact
pub fn write_csv(lexicon: &Lexicon, path: &Path) -> Result<(), LexiconError> {
    std::fs::write(path, to_csv(lexicon)).map_err(|source| LexiconError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_header_and_rows() {
        let mut lexicon = Lexicon::new();
        lexicon.insert_pair('0', '1', 0.5);

        let csv = to_csv(&lexicon);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "character #1, character #2, similarity");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "0, 1, 0.5");
        assert_eq!(lines[2], "1, 0, 0.5");
    }

    #[test]
    fn test_csv_written_to_disk() {
        let mut lexicon = Lexicon::new();
        lexicon.insert_pair('E', 'F', 1.25);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.csv");
        write_csv(&lexicon, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("character #1, character #2, similarity"));
        assert!(text.contains("E, F, 1.25"));
        assert!(text.contains("F, E, 1.25"));
    }
}
