//! Append extracted rows to a delimited file: `date,description,amount,document`, no header.

use anyhow::{Context, Result, anyhow};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tallyline_core::OutputRow;

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl CsvSink<File> {
    /// Open `path` for appending, creating it if needed. Existing rows are kept.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        Self {
            writer,
            rows_written: 0,
        }
    }

    /// Write one document's rows and flush them to the underlying file
    pub fn write_rows(&mut self, rows: &[OutputRow]) -> Result<()> {
        for row in rows {
            self.writer.write_record(row.fields())?;
        }
        self.writer.flush()?;
        self.rows_written += rows.len();
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow!("flushing csv output: {}", e.error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallyline_core::TransactionRecord;

    fn row(desc: &str, amount: &str) -> OutputRow {
        OutputRow::new(TransactionRecord::new("01/02/23", desc, amount), "eStmt_2023-01-31")
    }

    #[test]
    fn test_rows_are_quoted_when_needed() {
        let mut sink = CsvSink::from_writer(Vec::new());
        sink.write_rows(&[
            row("Payroll Deposit", "1,200.00"),
            row("Check \"1041\" to Smith", "-40.00"),
        ])
        .unwrap();
        assert_eq!(sink.rows_written(), 2);

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "01/02/23,Payroll Deposit,\"1,200.00\",eStmt_2023-01-31\n\
             01/02/23,\"Check \"\"1041\"\" to Smith\",-40.00,eStmt_2023-01-31\n"
        );
    }

    #[test]
    fn test_open_append_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.csv");
        std::fs::write(&path, "12/30/22,Earlier,5.00,eStmt_2022-12-31\n").unwrap();

        let mut sink = CsvSink::open_append(&path).unwrap();
        sink.write_rows(&[row("Payroll Deposit", "300.00")]).unwrap();
        drop(sink);

        let out = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            out,
            "12/30/22,Earlier,5.00,eStmt_2022-12-31\n\
             01/02/23,Payroll Deposit,300.00,eStmt_2023-01-31\n"
        );
    }
}
