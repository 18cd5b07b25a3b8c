//! Batch driver: extract every statement in a folder into one CSV.
//!
//! Documents are processed one at a time. A document that fails to parse is
//! reported and skipped; its rows are never written, and the batch goes on.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tallyline_ingest::{StatementExtract, StatementParser};

use crate::csv_sink::CsvSink;
use crate::document::load_statement;

/// Result for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    /// File name as found in the folder
    pub name: String,
    /// Rows written, or the failure cause
    pub result: std::result::Result<usize, String>,
    /// Sections whose records did not add up to their printed subtotal
    pub unbalanced: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn total_rows(&self) -> usize {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok()).sum()
    }
}

/// Batch totals; the per-document notices are logged by [`run_batch`] as they happen.
impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} file(s): {} ok, {} failed",
            self.outcomes.len(),
            self.succeeded().count(),
            self.failed().count()
        )?;
        let unbalanced = self.succeeded().filter(|o| !o.unbalanced.is_empty()).count();
        if unbalanced > 0 {
            write!(f, ", {unbalanced} with sections off their subtotal")?;
        }
        Ok(())
    }
}

/// Regular files in `folder` with the given extension, sorted by name
pub fn discover_documents(folder: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(folder).with_context(|| format!("reading folder {}", folder.display()))?;

    let mut docs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading folder {}", folder.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            docs.push(path);
        }
    }
    docs.sort();
    Ok(docs)
}

/// Identifier written next to every row: the file name without its extension
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Render and parse a single statement
pub fn extract_document(parser: &StatementParser, path: &Path) -> Result<StatementExtract> {
    let statement = load_statement(path)?;
    parser.process(&statement, &document_id(path))
}

/// Extract each document in turn; with no sink the rows are counted but not written.
pub fn run_batch<W: Write>(
    documents: &[PathBuf],
    parser: &StatementParser,
    mut sink: Option<&mut CsvSink<W>>,
) -> BatchReport {
    let mut report = BatchReport::default();

    for path in documents {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = extract_document(parser, path).and_then(|extract| {
            if let Some(sink) = sink.as_deref_mut() {
                sink.write_rows(&extract.rows)
                    .with_context(|| format!("writing rows for {name}"))?;
            }
            Ok(extract)
        });

        let outcome = match outcome {
            Ok(extract) => {
                let unbalanced: Vec<String> = extract
                    .unbalanced_sections()
                    .map(|s| s.section.label.to_string())
                    .collect();
                log::info!(
                    "Extraction of {name} completed successfully ({} rows)",
                    extract.rows.len()
                );
                DocumentOutcome {
                    name,
                    result: Ok(extract.rows.len()),
                    unbalanced,
                }
            }
            Err(e) => {
                log::error!("Error processing file {name}, skipped: {e:#}");
                DocumentOutcome {
                    name,
                    result: Err(format!("{e:#}")),
                    unbalanced: Vec::new(),
                }
            }
        };
        report.outcomes.push(outcome);
    }

    report
}
