//! Pre-rendered statements, e.g. `pdftotext -layout eStmt.pdf eStmt.txt`.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::document::RenderedStatement;

const FORM_FEED: char = '\u{c}';

pub fn load_text(path: &Path) -> Result<RenderedStatement> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(RenderedStatement::from_page_texts(split_pages(&text)))
}

/// Split on form feeds; the feed closing the last page does not start a new one.
pub fn split_pages(text: &str) -> Vec<&str> {
    let text = text.strip_suffix(FORM_FEED).unwrap_or(text);
    text.split(FORM_FEED).collect()
}
