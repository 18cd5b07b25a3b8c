//! Transaction records as they are read off a statement page

use serde::{Deserialize, Serialize};

/// One parsed transaction line (possibly wrapped across several printed lines)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Date token exactly as printed (MM/DD/YY shape, not calendar-checked)
    pub date: String,
    /// Whitespace-normalized description, wrapped fragments joined by single spaces
    pub description: String,
    /// Signed amount exactly as printed, e.g. `-1,204.50`
    pub amount: String,
}

impl TransactionRecord {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount: amount.into(),
        }
    }

    /// Amount in cents, if the printed amount is well formed
    pub fn amount_cents(&self) -> Option<i64> {
        crate::money::parse_cents(&self.amount)
    }
}

/// A record tagged with the document it came from, ready for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(flatten)]
    pub record: TransactionRecord,
    /// Source document name with the extension stripped
    pub document: String,
}

impl OutputRow {
    pub fn new(record: TransactionRecord, document: impl Into<String>) -> Self {
        Self {
            record,
            document: document.into(),
        }
    }

    /// Fields in export order: date, description, amount, document
    pub fn fields(&self) -> [&str; 4] {
        [
            &self.record.date,
            &self.record.description,
            &self.record.amount,
            &self.document,
        ]
    }
}

/// Inclusive, 1-indexed page span holding an account's transaction tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub first_page: usize,
    pub last_page: usize,
}

impl PageRange {
    pub fn new(first_page: usize, last_page: usize) -> Self {
        Self {
            first_page,
            last_page,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_page == 0 || self.first_page > self.last_page
    }

    /// 0-indexed page indices covered by this range
    pub fn indices(&self) -> std::ops::Range<usize> {
        if self.is_empty() {
            return 0..0;
        }
        (self.first_page - 1)..self.last_page
    }

    /// Restrict the range to a document with `page_count` pages
    pub fn clamp_to(&self, page_count: usize) -> Self {
        Self {
            first_page: self.first_page.max(1),
            last_page: self.last_page.min(page_count),
        }
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pages {}-{}", self.first_page, self.last_page)
    }
}
