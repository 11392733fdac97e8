//! Identifier extraction from Python source
//!
//! Walks a tree-sitter parse of the target file and collects every
//! `identifier` node as `(name, line)`, then dedups to the first occurrence
//! of each name in source order. This is glue feeding the analysis
//! pipeline; the similarity engines never look at source text themselves.

use crate::models::Identifier;
use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use std::path::Path;
use tree_sitter::{Parser, Query, QueryCursor, StreamingIterator};

/// Result of scanning one source file
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Identifier occurrences in the file, duplicates included
    pub occurrences: usize,
    /// Unique identifiers in first-seen order
    pub identifiers: Vec<Identifier>,
}

/// Parse a Python file and return its identifiers, first occurrence only
pub fn extract_identifiers(path: &Path) -> Result<Extraction> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    extract_from_source(&source)
}

/// Extract identifiers from Python source text directly (useful for testing)
pub fn extract_from_source(source: &str) -> Result<Extraction> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    parser
        .set_language(&language.into())
        .context("Failed to set Python language")?;

    let tree = parser
        .parse(source, None)
        .context("Failed to parse Python source")?;

    let query = Query::new(&language.into(), "(identifier) @name")
        .context("Failed to create identifier query")?;

    let source_bytes = source.as_bytes();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source_bytes);

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut extraction = Extraction::default();

    while let Some(m) = matches.next() {
        for capture in m.captures.iter() {
            let Ok(name) = capture.node.utf8_text(source_bytes) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            extraction.occurrences += 1;
            if seen.contains(name) {
                continue;
            }
            seen.insert(name.to_string());
            let line = capture.node.start_position().row as u32 + 1;
            extraction.identifiers.push(Identifier::new(name, line));
        }
    }

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_assignment_targets() {
        let extraction = extract_from_source("total = 0\ncount = total + 1\n").unwrap();
        let names: Vec<&str> = extraction.identifiers.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["total", "count"]);
        assert_eq!(extraction.occurrences, 3);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let extraction = extract_from_source("x = 1\ny = x\nx = y\n").unwrap();
        let x = extraction.identifiers.iter().find(|i| i.name == "x").unwrap();
        assert_eq!(x.line, 1);
        assert_eq!(extraction.identifiers.len(), 2);
        assert_eq!(extraction.occurrences, 4);
    }

    #[test]
    fn test_lines_are_one_indexed() {
        let extraction = extract_from_source("\n\nwrite = 0\n").unwrap();
        assert_eq!(extraction.identifiers[0].name, "write");
        assert_eq!(extraction.identifiers[0].line, 3);
    }

    #[test]
    fn test_loop_and_call_names() {
        let source = "for item in count:\n    total += item\nprint(total)\n";
        let extraction = extract_from_source(source).unwrap();
        let names: Vec<&str> = extraction.identifiers.iter().map(|i| i.name.as_str()).collect();
        assert!(names.contains(&"item"));
        assert!(names.contains(&"count"));
        assert!(names.contains(&"total"));
        assert!(names.contains(&"print"));
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let extraction = extract_from_source("").unwrap();
        assert!(extraction.identifiers.is_empty());
        assert_eq!(extraction.occurrences, 0);
    }
}
