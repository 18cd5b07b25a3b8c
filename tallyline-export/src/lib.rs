//! tallyline-export: statement loading (PDF / pre-rendered text), CSV output and the batch driver

pub mod batch;
pub mod csv_sink;
pub mod document;
pub mod pdf_source;
pub mod text_source;

pub use batch::{
    BatchReport, DocumentOutcome, discover_documents, document_id, extract_document, run_batch,
};
pub use csv_sink::CsvSink;
pub use document::{DocumentFormat, RenderedStatement, load_statement};
