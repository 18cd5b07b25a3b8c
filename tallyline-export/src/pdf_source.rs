//! PDF statements rendered page by page with `pdf-extract`.

use anyhow::{Result, anyhow};
use std::path::Path;

use crate::document::RenderedStatement;

pub fn load_pdf(path: &Path) -> Result<RenderedStatement> {
    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| anyhow!("extracting text from {}: {e}", path.display()))?;
    log::debug!("{}: rendered {} page(s)", path.display(), pages.len());
    Ok(RenderedStatement::from_page_texts(pages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_pdf_is_an_error() {
        let err = load_pdf(Path::new("/nonexistent/eStmt_2023-01-31.pdf")).unwrap_err();
        assert!(err.to_string().contains("eStmt_2023-01-31.pdf"));
    }
}
