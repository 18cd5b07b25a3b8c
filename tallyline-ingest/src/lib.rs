//! tallyline-ingest: statement text parsing (section location, record scanning, page layout).

pub mod error;
pub mod locator;
pub mod parsers;
pub mod patterns;
pub mod scanner;
pub mod source;

pub use error::{ExtractError, ScanError};
pub use locator::locate;
pub use parsers::{LayoutRules, StatementExtract, StatementLayout, StatementParser};
pub use patterns::Patterns;
pub use scanner::{Scan, scan};
pub use source::{InMemoryPages, PageSource};
