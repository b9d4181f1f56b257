use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::{AmountSet, BudgetState, Currency};

/// Fixed base name for exported files; the format picks the extension.
pub const EXPORT_BASENAME: &str = "wedding-budget";

/// One export line, already formatted for display in the chosen currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub category: String,
    pub allocated: String,
    pub actual: String,
}

/// Project allocations and actual expenses into display rows. Row order
/// follows allocation order; a category with no recorded expense shows zero.
pub fn to_export_rows(
    allocations: &AmountSet,
    expenses: &AmountSet,
    currency: Currency,
) -> Vec<ExportRow> {
    allocations
        .iter()
        .map(|(category, amount)| ExportRow {
            category: category.to_string(),
            allocated: currency.display(amount),
            actual: currency.display(expenses.get_or_zero(category)),
        })
        .collect()
}

/// Write rows as CSV with the original's header. Returns the row count.
pub fn write_csv(path: &Path, rows: &[ExportRow]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;

    writer.write_record(["Category", "Allocated Budget", "Actual Expenses"])?;
    for row in rows {
        writer.write_record([&row.category, &row.allocated, &row.actual])?;
    }
    writer.flush().context("Failed to write export file")?;
    Ok(rows.len())
}

/// Write a plain-text table report of the whole plan. Returns the row count.
pub fn write_report(path: &Path, state: &BudgetState, rows: &[ExportRow]) -> Result<usize> {
    let mut out = String::new();
    out.push_str("Wedding Budget Allocation\n");
    out.push_str(&"─".repeat(58));
    out.push('\n');
    out.push_str(&format!(
        "Location: {}, {}\n",
        state.locality, state.region
    ));
    out.push_str(&format!(
        "Date:     {}\n",
        state.event_date.format("%B %-d, %Y")
    ));
    out.push_str(&format!(
        "Budget:   {}\n\n",
        state.currency.display(state.total_budget)
    ));

    out.push_str(&format!(
        "{:<20} {:>16} {:>16}\n",
        "Category", "Allocated", "Actual"
    ));
    out.push_str(&"─".repeat(58));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:<20} {:>16} {:>16}\n",
            row.category, row.allocated, row.actual
        ));
    }
    out.push_str(&"─".repeat(58));
    out.push('\n');
    out.push_str(&format!(
        "{:<20} {:>16} {:>16}\n",
        "Total",
        state.currency.display(state.allocations.total()),
        state.currency.display(state.actual_expenses.total()),
    ));

    std::fs::write(path, out)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(rows.len())
}

/// Default export destination: `$HOME/wedding-budget.<ext>`.
pub fn default_export_path(extension: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(format!("{home}/{EXPORT_BASENAME}.{extension}"))
}

#[cfg(test)]
mod tests;
