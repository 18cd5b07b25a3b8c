//! Printed monetary amounts (`-1,204.50`) and subtotal reconciliation.
//!
//! Amounts stay strings in records; cents are only computed to decide whether
//! a section is empty and to cross-check a scanned section against its subtotal.

use serde::Serialize;

use crate::record::TransactionRecord;

/// Parse a printed amount into signed cents.
///
/// Accepts an optional leading sign, optional thousands commas and exactly two
/// fractional digits. Amounts beyond the `i64` cent range are unreadable.
pub fn parse_cents(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (whole, frac) = digits.split_once('.')?;
    if frac.len() != 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: String = whole.chars().filter(|c| *c != ',').collect();
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let cents = whole
        .parse::<i64>()
        .ok()?
        .checked_mul(100)?
        .checked_add(frac.parse::<i64>().ok()?)?;
    Some(if negative { -cents } else { cents })
}

/// True for subtotals such as `0.00` and `-0.00` that mark a section as absent
pub fn is_zero_amount(s: &str) -> bool {
    parse_cents(s) == Some(0)
}

/// Sum of a scanned section compared with the subtotal printed on the summary page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub expected_cents: Option<i64>,
    pub actual_cents: i64,
    /// Records whose amount could not be read as cents, or would overflow the sum
    pub unreadable: usize,
}

impl Reconciliation {
    pub fn compute(subtotal: &str, records: &[TransactionRecord]) -> Self {
        let mut actual_cents: i64 = 0;
        let mut unreadable = 0;
        for rec in records {
            match rec.amount_cents().and_then(|c| c.checked_add(actual_cents)) {
                Some(sum) => actual_cents = sum,
                None => unreadable += 1,
            }
        }
        Self {
            expected_cents: parse_cents(subtotal),
            actual_cents,
            unreadable,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.unreadable == 0 && self.expected_cents == Some(self.actual_cents)
    }

    /// Expected minus actual, when the subtotal was readable and the difference fits
    pub fn delta_cents(&self) -> Option<i64> {
        self.expected_cents.and_then(|e| e.checked_sub(self.actual_cents))
    }
}
