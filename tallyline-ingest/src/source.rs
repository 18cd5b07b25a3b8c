//! Abstraction over a rendered statement: page count plus the text lines of each page.

use anyhow::{Result, bail};

pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Lines of the page at 0-based `index`, in reading order
    fn page_lines(&self, index: usize) -> Result<Vec<String>>;

    /// Whole page as one string (what the layout markers are searched in)
    fn page_text(&self, index: usize) -> Result<String> {
        Ok(self.page_lines(index)?.join("\n"))
    }
}

/// Pages held as plain strings
#[derive(Debug, Clone, Default)]
pub struct InMemoryPages {
    pages: Vec<String>,
}

impl InMemoryPages {
    pub fn new<S: Into<String>>(pages: impl IntoIterator<Item = S>) -> Self {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }
}

impl PageSource for InMemoryPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_lines(&self, index: usize) -> Result<Vec<String>> {
        let Some(page) = self.pages.get(index) else {
            bail!(
                "page {} requested but document has {} page(s)",
                index + 1,
                self.pages.len()
            );
        };
        Ok(page.lines().map(str::to_string).collect())
    }
}
