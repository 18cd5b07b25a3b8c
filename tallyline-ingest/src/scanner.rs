//! Record scanner: pulls (date, description, amount) records out of a section's table.
//!
//! Two states. While seeking, lines that do not start with a date (table headers,
//! page footers, carried-over headings) are skipped. Once a date is seen, text is
//! accumulated line by line until an amount appears; the printed statements wrap
//! long descriptions with no continuation marker, so a line without an amount is
//! the only sign that the record continues.

use regex::Regex;
use tallyline_core::TransactionRecord;

use crate::error::ScanError;
use crate::patterns::Patterns;

/// Records found between the scan start and the section's end marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub records: Vec<TransactionRecord>,
    /// Index of the line matching the end marker
    pub end_index: usize,
}

/// Scan from `from` until a line matches `end_marker`.
///
/// Fails with [`ScanError::AmountMissing`] when a date has no amount anywhere
/// before input ends, and with [`ScanError::EndMarkerUnreached`] when input ends
/// while still looking for the next record.
pub fn scan<S: AsRef<str>>(
    lines: &[S],
    patterns: &Patterns,
    end_marker: &Regex,
    from: usize,
) -> Result<Scan, ScanError> {
    let mut records = Vec::new();
    let mut cursor = from;

    loop {
        let Some(line) = lines.get(cursor).map(|l| l.as_ref()) else {
            return Err(ScanError::EndMarkerUnreached);
        };
        if end_marker.is_match(line) {
            return Ok(Scan {
                records,
                end_index: cursor,
            });
        }

        let Some(date) = patterns.date.find(line) else {
            cursor += 1;
            continue;
        };
        let date_line = cursor;
        let mut desc_start = skip_separator(line, date.end());
        let mut fragments: Vec<&str> = Vec::new();

        let amount = loop {
            let Some(current) = lines.get(cursor).map(|l| l.as_ref()) else {
                return Err(ScanError::AmountMissing {
                    date: date.as_str().to_string(),
                    line: date_line,
                });
            };
            let start = desc_start.min(current.len());
            if let Some(m) = patterns.amount.find_at(current, start) {
                fragments.push(&current[start..m.start()]);
                break m.as_str();
            }
            fragments.push(&current[start..]);
            desc_start = 0;
            cursor += 1;
        };

        records.push(TransactionRecord::new(
            date.as_str(),
            join_fragments(&fragments),
            amount,
        ));
        cursor += 1;
    }
}

// One character of gap sits between the printed date and the description.
fn skip_separator(line: &str, date_end: usize) -> usize {
    line[date_end..]
        .chars()
        .next()
        .map_or(date_end, |c| date_end + c.len_utf8())
}

fn join_fragments(fragments: &[&str]) -> String {
    fragments
        .iter()
        .flat_map(|f| f.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end(label: &str) -> Regex {
        Regex::new(label).unwrap()
    }

    #[test]
    fn test_single_line_record() {
        let p = Patterns::new().unwrap();
        let lines = [
            "Deposits and other additions",
            "Date  Description  Amount",
            "01/02/23 Payroll Deposit 1,200.00",
            "Total deposits and other additions 1,200.00",
        ];
        let scan = scan(&lines, &p, &end("Total deposits and other additions"), 2).unwrap();
        assert_eq!(
            scan.records,
            vec![TransactionRecord::new("01/02/23", "Payroll Deposit", "1,200.00")]
        );
        assert_eq!(scan.end_index, 3);
    }

    #[test]
    fn test_two_line_description() {
        let p = Patterns::new().unwrap();
        let lines = ["01/02/23 Refund from", "Acme Corp 45.00", "Total checks -45.00"];
        let scan = scan(&lines, &p, &end("Total checks"), 0).unwrap();
        assert_eq!(
            scan.records,
            vec![TransactionRecord::new("01/02/23", "Refund from Acme Corp", "45.00")]
        );
        assert_eq!(scan.end_index, 2);
    }

    #[test]
    fn test_three_line_description_collapses_whitespace() {
        let p = Patterns::new().unwrap();
        let lines = [
            "01/09/23 WIRE TYPE:INTL  OUT",
            "   ID:8832 BNF:GLOBEX",
            "LTD   -2,500.00",
            "Total withdrawals and other subtractions -2,500.00",
        ];
        let scan = scan(&lines, &p, &end("Total withdrawals"), 0).unwrap();
        assert_eq!(scan.records.len(), 1);
        assert_eq!(
            scan.records[0].description,
            "WIRE TYPE:INTL OUT ID:8832 BNF:GLOBEX LTD"
        );
        assert_eq!(scan.records[0].amount, "-2,500.00");
    }

    #[test]
    fn test_skips_lines_before_a_date() {
        let p = Patterns::new().unwrap();
        let lines = [
            "continued on next page",
            "Date Description Amount",
            "01/03/23 Coffee -4.50",
            "Page 4 of 6",
            "01/04/23 Grocer -61.20",
            "Total withdrawals and other subtractions -65.70",
        ];
        let scan = scan(&lines, &p, &end("Total withdrawals"), 0).unwrap();
        let amounts: Vec<_> = scan.records.iter().map(|r| r.amount.as_str()).collect();
        assert_eq!(amounts, vec!["-4.50", "-61.20"]);
        assert_eq!(scan.end_index, 5);
    }

    #[test]
    fn test_round_trip_synthetic_section() {
        let p = Patterns::new().unwrap();
        let want: Vec<TransactionRecord> = (1..=12)
            .map(|i| {
                TransactionRecord::new(
                    format!("02/{i:02}/23"),
                    format!("Merchant number {i}"),
                    format!("-{},{:03}.{:02}", i, i * 7, i),
                )
            })
            .collect();

        let mut lines = vec!["Date Description Amount".to_string()];
        for r in &want {
            lines.push(format!("{} {} {}", r.date, r.description, r.amount));
        }
        lines.push("Total withdrawals and other subtractions -1.00".to_string());

        let scan = scan(&lines, &p, &end("Total withdrawals"), 0).unwrap();
        assert_eq!(scan.records, want);
        assert_eq!(scan.end_index, lines.len() - 1);
    }

    #[test]
    fn test_empty_table() {
        let p = Patterns::new().unwrap();
        let lines = ["Date Description Amount", "Total service fees 0.00"];
        let scan = scan(&lines, &p, &end("Total service fees"), 0).unwrap();
        assert!(scan.records.is_empty());
        assert_eq!(scan.end_index, 1);
    }

    #[test]
    fn test_truncated_section_fails() {
        let p = Patterns::new().unwrap();
        let lines = ["01/02/23 Payroll 1,200.00", "01/03/23 Payroll 300.00"];
        let err = scan(&lines, &p, &end("Total deposits"), 0).unwrap_err();
        assert_eq!(err, ScanError::EndMarkerUnreached);
    }

    #[test]
    fn test_date_without_amount_fails() {
        let p = Patterns::new().unwrap();
        let lines = ["Header", "01/02/23 Payroll 1,200.00", "01/05/23 Dangling", "text"];
        let err = scan(&lines, &p, &end("Total deposits"), 0).unwrap_err();
        assert_eq!(
            err,
            ScanError::AmountMissing {
                date: "01/05/23".into(),
                line: 2
            }
        );
    }

    #[test]
    fn test_date_alone_on_line() {
        let p = Patterns::new().unwrap();
        let lines = ["01/02/23", "ACH CREDIT 12.00", "Total deposits 12.00"];
        let scan = scan(&lines, &p, &end("Total deposits"), 0).unwrap();
        assert_eq!(
            scan.records,
            vec![TransactionRecord::new("01/02/23", "ACH CREDIT", "12.00")]
        );
    }

    #[test]
    fn test_non_ascii_separator() {
        let p = Patterns::new().unwrap();
        let lines = ["01/02/23\u{a0}Café Olé -8.25", "Total checks -8.25"];
        let scan = scan(&lines, &p, &end("Total checks"), 0).unwrap();
        assert_eq!(scan.records[0].description, "Café Olé");
        assert_eq!(scan.records[0].amount, "-8.25");
    }
}
