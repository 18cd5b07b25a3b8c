//! Rendered statements: page text split into lines, loaded from PDF or pre-rendered text.

use anyhow::{Result, bail};
use std::path::Path;
use tallyline_ingest::PageSource;

use crate::{pdf_source, text_source};

/// A statement already rendered to text, one line list per page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedStatement {
    pages: Vec<Vec<String>>,
}

impl RenderedStatement {
    /// Build from per-page text; trailing whitespace is dropped from every line
    pub fn from_page_texts<S: AsRef<str>>(texts: impl IntoIterator<Item = S>) -> Self {
        let pages = texts
            .into_iter()
            .map(|t| t.as_ref().lines().map(|l| l.trim_end().to_string()).collect())
            .collect();
        Self { pages }
    }
}

impl PageSource for RenderedStatement {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_lines(&self, index: usize) -> Result<Vec<String>> {
        match self.pages.get(index) {
            Some(lines) => Ok(lines.clone()),
            None => bail!(
                "page {} requested but statement has {} page(s)",
                index + 1,
                self.pages.len()
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    /// `pdftotext`-style output, pages separated by form feeds
    Text,
}

impl DocumentFormat {
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(DocumentFormat::Pdf)
        } else if ext.eq_ignore_ascii_case("txt") {
            Some(DocumentFormat::Text)
        } else {
            None
        }
    }

    pub fn load(self, path: &Path) -> Result<RenderedStatement> {
        match self {
            DocumentFormat::Pdf => pdf_source::load_pdf(path),
            DocumentFormat::Text => text_source::load_text(path),
        }
    }
}

/// Load a statement, picking the renderer from the file extension
pub fn load_statement(path: &Path) -> Result<RenderedStatement> {
    match DocumentFormat::for_path(path) {
        Some(format) => format.load(path),
        None => bail!("unsupported document type: {}", path.display()),
    }
}
