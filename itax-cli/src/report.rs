//! Plain-text client reports.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use itax_core::{Evaluation, Regime, RegimeResult};
use regex::Regex;
use tracing::info;

use crate::utils::format_inr;

const FALLBACK_NAME: &str = "Client";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("file-name pattern is valid"));

/// Report for one client: taxable income under the Old regime, tax under
/// both regimes and the better option.
#[derive(Debug, Clone, Copy)]
pub struct ClientReport<'a> {
    name: &'a str,
    evaluation: &'a Evaluation,
}

impl<'a> ClientReport<'a> {
    pub fn new(
        name: &'a str,
        evaluation: &'a Evaluation,
    ) -> Self {
        Self { name, evaluation }
    }

    fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            FALLBACK_NAME
        } else {
            trimmed
        }
    }

    fn better_option(&self) -> String {
        if self.evaluation.is_tie() {
            format!("{} (both regimes cost the same)", self.evaluation.recommended)
        } else {
            self.evaluation.recommended.to_string()
        }
    }

    /// `<name>_Tax_Report.txt`, with anything outside `[A-Za-z0-9_-]`
    /// collapsed to `_`.
    pub fn file_name(&self) -> String {
        let cleaned = UNSAFE_CHARS.replace_all(self.display_name(), "_");
        let cleaned = cleaned.trim_matches('_');
        let stem = if cleaned.is_empty() {
            FALLBACK_NAME
        } else {
            cleaned
        };
        format!("{stem}_Tax_Report.txt")
    }

    /// Writes the report into `dir` (created if missing) and returns the path.
    pub fn write_to(
        &self,
        dir: &Path,
    ) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.to_string())
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "wrote report");
        Ok(path)
    }

    /// One line for client listings.
    pub fn summary_line(
        &self,
        id: i64,
    ) -> String {
        format!(
            "{:>4}  {:<24} old {:>16}  new {:>16}  -> {}",
            id,
            self.display_name(),
            format_inr(self.evaluation.old.tax_payable),
            format_inr(self.evaluation.new.tax_payable),
            self.evaluation.recommended,
        )
    }
}

impl fmt::Display for ClientReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let evaluation = self.evaluation;
        writeln!(f, "Income Tax Report - {}", self.display_name())?;
        writeln!(f)?;
        writeln!(f, "Taxable Income: {}", format_inr(evaluation.old.taxable_income))?;
        writeln!(f, "Tax (Old Regime): {}", format_inr(evaluation.old.tax_payable))?;
        writeln!(f, "Tax (New Regime): {}", format_inr(evaluation.new.tax_payable))?;
        writeln!(f, "Better Option: {}", self.better_option())?;
        if !evaluation.is_tie() {
            writeln!(f, "Savings: {}", format_inr(evaluation.savings))?;
        }
        Ok(())
    }
}

/// Step-by-step breakdown of both regimes, one column each.
pub fn render_breakdown(evaluation: &Evaluation) -> String {
    let rows: [(&str, fn(&RegimeResult) -> rust_decimal::Decimal); 8] = [
        ("Gross income", |r| r.gross_income),
        ("Deductions", |r| r.deductions),
        ("Taxable income", |r| r.taxable_income),
        ("Slab tax", |r| r.slab_tax),
        ("Rebate", |r| r.rebate),
        ("Surcharge", |r| r.surcharge),
        ("Cess", |r| r.cess),
        ("Tax payable", |r| r.tax_payable),
    ];

    let mut out = format!(
        "{:<16}{:>18}{:>18}\n",
        "",
        Regime::Old.label(),
        Regime::New.label()
    );
    for (label, value) in rows {
        out.push_str(&format!(
            "{:<16}{:>18}{:>18}\n",
            label,
            format_inr(value(&evaluation.old)),
            format_inr(value(&evaluation.new)),
        ));
    }
    out.push_str(&format!("\nRecommended: {}", evaluation.recommended));
    if evaluation.is_tie() {
        out.push_str(" (tie)\n");
    } else {
        out.push_str(&format!(", saves {}\n", format_inr(evaluation.savings)));
    }
    out
}
