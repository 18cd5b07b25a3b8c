//! The lexical shapes recognized on statement lines.

use anyhow::Result;
use regex::Regex;
use tallyline_core::Section;

/// Short date, e.g. `01/31/23`
pub const DATE_PATTERN: &str = r"[0-9]{2}/[0-9]{2}/[0-9]{2}";

/// Signed amount with optional thousands separators, e.g. `-1,204.50`
pub const AMOUNT_PATTERN: &str = r"[+-]?[0-9]{1,3}(?:,?[0-9]{3})*\.[0-9]{2}";

/// Compiled date/amount patterns, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct Patterns {
    /// Anchored: a record must start with its date
    pub date: Regex,
    pub amount: Regex,
}

/// Begin/end line markers for one section's table
#[derive(Debug, Clone)]
pub struct SectionMarkers {
    /// The section heading standing alone at the end of a line
    pub begin: Regex,
    /// `Total <lowercase label>` anywhere on the line
    pub end: Regex,
}

impl Patterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            date: Regex::new(&format!("^{DATE_PATTERN}"))?,
            amount: Regex::new(AMOUNT_PATTERN)?,
        })
    }

    pub fn section_markers(&self, section: &Section) -> Result<SectionMarkers> {
        Ok(SectionMarkers {
            begin: Regex::new(&format!("{}$", regex::escape(section.label)))?,
            end: Regex::new(&regex::escape(&section.end_marker_text()))?,
        })
    }

    /// Summary-page line: the section label immediately followed by its subtotal
    pub fn subtotal(&self, section: &Section) -> Result<Regex> {
        Ok(Regex::new(&format!(
            "{} ({AMOUNT_PATTERN})",
            regex::escape(section.label)
        ))?)
    }
}
