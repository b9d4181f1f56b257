#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::alloc::{build_state, record_expense, LocationTable};

fn sample_state() -> BudgetState {
    let state = build_state(
        dec!(10000),
        "Texas",
        "Austin",
        Currency::Usd,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        LocationTable::builtin(),
    )
    .unwrap();
    record_expense(&state, "Venue", "2750.50")
}

#[test]
fn test_rows_follow_allocation_order() {
    let state = sample_state();
    let rows = to_export_rows(&state.allocations, &state.actual_expenses, state.currency);
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].category, "Venue");
    assert_eq!(rows[9].category, "Miscellaneous");
}

#[test]
fn test_rows_format_and_default_expense() {
    let state = sample_state();
    let rows = to_export_rows(&state.allocations, &state.actual_expenses, state.currency);
    assert_eq!(rows[0].allocated, "$2600.00");
    assert_eq!(rows[0].actual, "$2750.50");
    // No recorded expense renders as zero, not as a missing cell.
    assert_eq!(rows[1].category, "Catering");
    assert_eq!(rows[1].actual, "$0.00");
}

#[test]
fn test_rows_converted_currency() {
    let state = sample_state();
    let rows = to_export_rows(&state.allocations, &state.actual_expenses, Currency::Eur);
    // 2600 / 0.84 = 3095.238…, shown to two places.
    assert_eq!(rows[0].allocated, "€3095.24");
}

#[test]
fn test_write_csv() {
    let state = sample_state();
    let rows = to_export_rows(&state.allocations, &state.actual_expenses, state.currency);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{EXPORT_BASENAME}.csv"));
    let count = write_csv(&path, &rows).unwrap();
    assert_eq!(count, 10);

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Category,Allocated Budget,Actual Expenses"
    );
    assert_eq!(lines.next().unwrap(), "Venue,$2600.00,$2750.50");
    assert_eq!(contents.lines().count(), 11);
}

#[test]
fn test_write_report() {
    let state = sample_state();
    let rows = to_export_rows(&state.allocations, &state.actual_expenses, state.currency);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{EXPORT_BASENAME}.txt"));
    write_report(&path, &state, &rows).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Wedding Budget Allocation"));
    assert!(contents.contains("Austin, Texas"));
    assert!(contents.contains("Venue"));
    assert!(contents.contains("$10000.00"));
}

#[test]
fn test_default_export_path_uses_basename() {
    let path = default_export_path("csv");
    assert!(path.to_string_lossy().ends_with("/wedding-budget.csv"));
}
