//! Structural parse failures.
//!
//! A failure aborts the whole document; none of them are retried since the
//! same text would fail the same way.

/// Failure of a single record scan, before it is attributed to a section.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("end marker not reached before end of input")]
    EndMarkerUnreached,

    #[error("date {date} on line {line} has no amount before end of input")]
    AmountMissing { date: String, line: usize },
}

impl ScanError {
    pub fn in_section(self, section: &str) -> ExtractError {
        let section = section.to_string();
        match self {
            ScanError::EndMarkerUnreached => ExtractError::EndMarkerUnreached { section },
            ScanError::AmountMissing { date, line } => {
                ExtractError::AmountMissing { section, date, line }
            }
        }
    }
}

/// Classified failure for one statement, naming the section that broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("could not find the start of section '{section}'")]
    MarkerNotFound { section: String },

    #[error("section '{section}' runs past the end of the statement without its total line")]
    EndMarkerUnreached { section: String },

    #[error("section '{section}': date {date} on line {line} has no amount before end of input")]
    AmountMissing {
        section: String,
        date: String,
        line: usize,
    },
}

impl ExtractError {
    pub fn section(&self) -> &str {
        match self {
            ExtractError::MarkerNotFound { section }
            | ExtractError::EndMarkerUnreached { section }
            | ExtractError::AmountMissing { section, .. } => section,
        }
    }
}
