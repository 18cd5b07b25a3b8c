//! tallyline-core: record, section and money types shared by the statement parser and exporters

pub mod money;
pub mod record;
pub mod section;

pub use money::{Reconciliation, is_zero_amount, parse_cents};
pub use record::{OutputRow, PageRange, TransactionRecord};
pub use section::{SECTIONS, Section};
