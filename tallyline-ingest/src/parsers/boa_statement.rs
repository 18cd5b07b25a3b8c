//! Bank of America deposit account statement parser (text)
//!
//! Expected extracted-text layout of the account's pages:
//!   Deposits and other additions
//!   Date        Description                                        Amount
//!   01/03/23    PAYROLL ACME CORP DES:DIR DEP ID:XXXXX              1,200.00
//!   01/17/23    Zelle Transfer Conf# f8k2l; Jane Doe from
//!               savings                                              150.00
//!   Total deposits and other additions                              1,350.00
//!
//! The account summary lists one subtotal per section; sections whose subtotal
//! is zero are not printed in the transaction pages and are not searched for.

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tallyline_core::{
    OutputRow, PageRange, Reconciliation, SECTIONS, Section, is_zero_amount,
};

use crate::error::ExtractError;
use crate::locator::locate;
use crate::patterns::{Patterns, SectionMarkers};
use crate::scanner::scan;
use crate::source::PageSource;

/// Lines between a section heading and its first row (the column header)
const HEADER_LINES: usize = 2;

/// Where an account's tables live, for the two statement shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRules {
    /// First-page phrase identifying a statement that covers several accounts
    pub combined_marker: String,
    /// Account whose transactions are extracted
    pub target_account: String,
    /// Account printed right after the target on a combined statement
    pub next_account: String,
    /// Page the transaction tables start on when nothing else says otherwise
    pub first_transaction_page: usize,
    pub combined_summary_page: usize,
    pub single_summary_page: usize,
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            combined_marker: "Your combined statement".to_string(),
            target_account: "BofA Core Checking".to_string(),
            next_account: "Regular Savings".to_string(),
            first_transaction_page: 3,
            combined_summary_page: 3,
            single_summary_page: 1,
        }
    }
}

/// Statement shape, resolved once from the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementLayout {
    /// Several accounts; the target's pages are advertised on page 1
    Combined { range: PageRange },
    /// Just the target account
    Single { range: PageRange },
}

impl StatementLayout {
    pub fn range(&self) -> PageRange {
        match self {
            StatementLayout::Combined { range } | StatementLayout::Single { range } => *range,
        }
    }

    /// 1-indexed page carrying the account summary
    pub fn summary_page(&self, rules: &LayoutRules) -> usize {
        match self {
            StatementLayout::Combined { .. } => rules.combined_summary_page,
            StatementLayout::Single { .. } => rules.single_summary_page,
        }
    }
}

/// Printed subtotal for one section (None when the summary never mentions it)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSubtotal {
    pub section: Section,
    pub amount: Option<String>,
}

impl SectionSubtotal {
    /// A section is present only when its subtotal is printed and non-zero
    pub fn is_present(&self) -> bool {
        self.amount.as_deref().is_some_and(|a| !is_zero_amount(a))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionStatus {
    Skipped,
    Scanned {
        records: usize,
        begin_index: usize,
        end_index: usize,
        reconciliation: Reconciliation,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionOutcome {
    pub section: Section,
    #[serde(flatten)]
    pub status: SectionStatus,
}

/// Everything extracted from one statement
#[derive(Debug, Clone, Serialize)]
pub struct StatementExtract {
    pub document: String,
    pub layout: StatementLayout,
    pub subtotals: Vec<SectionSubtotal>,
    pub sections: Vec<SectionOutcome>,
    pub rows: Vec<OutputRow>,
}

impl StatementExtract {
    pub fn unbalanced_sections(&self) -> impl Iterator<Item = &SectionOutcome> {
        self.sections.iter().filter(|o| match &o.status {
            SectionStatus::Scanned { reconciliation, .. } => !reconciliation.is_balanced(),
            SectionStatus::Skipped => false,
        })
    }
}

struct SectionPlan {
    section: Section,
    markers: SectionMarkers,
    subtotal: Regex,
}

pub struct StatementParser {
    patterns: Patterns,
    rules: LayoutRules,
    target_page: Regex,
    next_page: Regex,
    plans: Vec<SectionPlan>,
}

impl StatementParser {
    pub fn new(rules: LayoutRules) -> Result<Self> {
        let patterns = Patterns::new()?;
        let plans = SECTIONS
            .iter()
            .map(|section| -> Result<SectionPlan> {
                Ok(SectionPlan {
                    section: *section,
                    markers: patterns.section_markers(section)?,
                    subtotal: patterns.subtotal(section)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            target_page: advertised_page_re(&rules.target_account)?,
            next_page: advertised_page_re(&rules.next_account)?,
            patterns,
            rules,
            plans,
        })
    }

    pub fn rules(&self) -> &LayoutRules {
        &self.rules
    }

    /// Decide the statement shape and the target account's page range.
    ///
    /// Missing page advertisements on a combined statement fall back to
    /// `first_transaction_page` rather than failing.
    pub fn resolve_layout(&self, first_page: &str, page_count: usize) -> StatementLayout {
        let default_page = self.rules.first_transaction_page;

        if !first_page.contains(&self.rules.combined_marker) {
            return StatementLayout::Single {
                range: PageRange::new(default_page, page_count),
            };
        }

        let first = advertised_page(&self.target_page, first_page).unwrap_or_else(|| {
            log::debug!(
                "no page advertised for '{}'; assuming page {default_page}",
                self.rules.target_account
            );
            default_page
        });
        let last = advertised_page(&self.next_page, first_page)
            .map(|p| p.saturating_sub(1))
            .unwrap_or(default_page);

        StatementLayout::Combined {
            range: PageRange::new(first, last),
        }
    }

    /// Read each section's subtotal off the summary page.
    ///
    /// Sections are looked for in catalogue order, one at a time; the scan stops
    /// once every section is found or the lines run out.
    pub fn read_subtotals<S: AsRef<str>>(&self, summary: &[S]) -> Vec<SectionSubtotal> {
        let mut amounts: Vec<Option<String>> = vec![None; self.plans.len()];
        let mut next = 0;

        for line in summary {
            let Some(plan) = self.plans.get(next) else {
                break;
            };
            if let Some(caps) = plan.subtotal.captures(line.as_ref()) {
                amounts[next] = Some(caps[1].to_string());
                next += 1;
            }
        }

        self.plans
            .iter()
            .zip(amounts)
            .map(|(plan, amount)| SectionSubtotal {
                section: plan.section,
                amount,
            })
            .collect()
    }

    /// Extract every present section of one statement.
    ///
    /// A section that cannot be parsed aborts the whole statement: the error is an
    /// [`ExtractError`] naming the section and no rows are returned.
    pub fn process(&self, source: &dyn PageSource, document: &str) -> Result<StatementExtract> {
        let page_count = source.page_count();
        if page_count == 0 {
            bail!("document has no pages");
        }

        let first_page = source.page_text(0).context("reading page 1")?;
        let mut layout = self.resolve_layout(&first_page, page_count);
        let range = layout.range();
        let clamped = range.clamp_to(page_count);
        if clamped != range {
            log::warn!("{document}: {range} outside a {page_count}-page document, using {clamped}");
            layout = match layout {
                StatementLayout::Combined { .. } => StatementLayout::Combined { range: clamped },
                StatementLayout::Single { .. } => StatementLayout::Single { range: clamped },
            };
        }
        log::debug!("{document}: {layout:?}");

        let summary_page = layout.summary_page(&self.rules);
        if summary_page == 0 || summary_page > page_count {
            bail!("summary page {summary_page} missing from a {page_count}-page document");
        }
        let summary = source
            .page_lines(summary_page - 1)
            .with_context(|| format!("reading summary page {summary_page}"))?;
        let subtotals = self.read_subtotals(&summary);

        let mut lines = Vec::new();
        for index in layout.range().indices() {
            let page = source
                .page_lines(index)
                .with_context(|| format!("reading page {}", index + 1))?;
            lines.extend(page);
        }

        let mut sections = Vec::with_capacity(self.plans.len());
        let mut rows = Vec::new();
        let mut search_from = 0;

        for (plan, subtotal) in self.plans.iter().zip(&subtotals) {
            let label = plan.section.label;
            let expected = match subtotal.amount.as_deref() {
                Some(amount) if subtotal.is_present() => amount,
                _ => {
                    log::debug!("{document}: '{label}' has a zero subtotal, skipping");
                    sections.push(SectionOutcome {
                        section: plan.section,
                        status: SectionStatus::Skipped,
                    });
                    continue;
                }
            };

            let begin = locate(&lines, &plan.markers.begin, search_from).ok_or_else(|| {
                ExtractError::MarkerNotFound {
                    section: label.to_string(),
                }
            })?;
            let found = scan(&lines, &self.patterns, &plan.markers.end, begin + HEADER_LINES)
                .map_err(|e| e.in_section(label))?;

            let reconciliation = Reconciliation::compute(expected, &found.records);
            if !reconciliation.is_balanced() {
                log::warn!(
                    "{document}: '{label}' records do not add up to the printed subtotal {expected} \
                     (off by {} cents, {} unreadable)",
                    reconciliation.delta_cents().unwrap_or_default(),
                    reconciliation.unreadable
                );
            }
            log::debug!(
                "{document}: '{label}' lines {begin}..={} yielded {} record(s)",
                found.end_index,
                found.records.len()
            );

            sections.push(SectionOutcome {
                section: plan.section,
                status: SectionStatus::Scanned {
                    records: found.records.len(),
                    begin_index: begin,
                    end_index: found.end_index,
                    reconciliation,
                },
            });
            rows.extend(
                found
                    .records
                    .into_iter()
                    .map(|record| OutputRow::new(record, document)),
            );
            search_from = found.end_index + 1;
        }

        Ok(StatementExtract {
            document: document.to_string(),
            layout,
            subtotals,
            sections,
            rows,
        })
    }
}

fn advertised_page_re(account: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"{} [^\r\n]+ Page ([0-9]+)",
        regex::escape(account)
    ))?)
}

fn advertised_page(re: &Regex, text: &str) -> Option<usize> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}
