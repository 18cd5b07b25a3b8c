//! The ordered catalogue of statement sections.
//!
//! Sections are scanned strictly in catalogue order: the end of one section's
//! table bounds where the search for the next one starts.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Section {
    /// Heading printed above the section's table and on the summary page
    pub label: &'static str,
}

impl Section {
    pub const fn new(label: &'static str) -> Self {
        Self { label }
    }

    /// Text of the line closing the section's table, e.g. `Total checks`
    pub fn end_marker_text(&self) -> String {
        format!("Total {}", self.label.to_lowercase())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

pub const SECTIONS: [Section; 4] = [
    Section::new("Deposits and other additions"),
    Section::new("Withdrawals and other subtractions"),
    Section::new("Checks"),
    Section::new("Service fees"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_marker_text() {
        assert_eq!(
            SECTIONS[0].end_marker_text(),
            "Total deposits and other additions"
        );
        assert_eq!(SECTIONS[2].end_marker_text(), "Total checks");
        assert_eq!(SECTIONS[3].end_marker_text(), "Total service fees");
    }

    #[test]
    fn test_catalogue_order() {
        let labels: Vec<_> = SECTIONS.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "Deposits and other additions",
                "Withdrawals and other subtractions",
                "Checks",
                "Service fees",
            ]
        );
    }
}
