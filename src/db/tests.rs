#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::alloc::{add_category, build_state, record_expense, LocationTable};

fn sample_state() -> BudgetState {
    build_state(
        dec!(10000),
        "Texas",
        "Austin",
        Currency::Gbp,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        LocationTable::builtin(),
    )
    .unwrap()
}

#[test]
fn test_fresh_database_has_no_state() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.load_state().unwrap().is_none());
}

#[test]
fn test_save_load_round_trip() {
    let mut db = Database::open_in_memory().unwrap();
    let state = sample_state();
    let state = record_expense(&state, "Venue", "2750.50");
    let state = add_category(&state, "Fireworks");

    db.save_state(&state).unwrap();
    let loaded = db.load_state().unwrap().unwrap();
    assert_eq!(loaded, state);
}

#[test]
fn test_allocation_order_survives_round_trip() {
    let mut db = Database::open_in_memory().unwrap();
    let state = sample_state();
    db.save_state(&state).unwrap();

    let loaded = db.load_state().unwrap().unwrap();
    let before: Vec<&str> = state.allocations.categories().collect();
    let after: Vec<&str> = loaded.allocations.categories().collect();
    assert_eq!(before, after);
}

#[test]
fn test_save_replaces_previous_snapshot() {
    let mut db = Database::open_in_memory().unwrap();
    let first = sample_state();
    db.save_state(&first).unwrap();

    let second = build_state(
        dec!(20000),
        "California",
        "Los Angeles",
        Currency::Usd,
        NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
        LocationTable::builtin(),
    )
    .unwrap();
    db.save_state(&second).unwrap();

    let loaded = db.load_state().unwrap().unwrap();
    assert_eq!(loaded, second);
    assert_eq!(loaded.allocations.len(), 10);
}

#[test]
fn test_loader_defaults_missing_optional_fields() {
    let db = Database::open_in_memory().unwrap();
    // A snapshot written before currency/date existed: both columns empty.
    db.conn
        .execute(
            "INSERT INTO plan (id, total_budget, region, locality, currency, event_date, saved_at)
             VALUES (1, '10000', 'Texas', 'Austin', '', '', '')",
            [],
        )
        .unwrap();

    let loaded = db.load_state().unwrap().unwrap();
    assert_eq!(loaded.currency, Currency::Usd);
    assert_eq!(loaded.event_date, chrono::Local::now().date_naive());
    assert!(loaded.actual_expenses.is_empty());
    assert!(loaded.custom_categories.is_empty());
}

#[test]
fn test_garbage_amount_defaults_to_zero() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "INSERT INTO plan (id, total_budget, region, locality, saved_at)
             VALUES (1, 'not-a-number', 'Texas', 'Austin', '')",
            [],
        )
        .unwrap();

    let loaded = db.load_state().unwrap().unwrap();
    assert_eq!(loaded.total_budget, Decimal::ZERO);
}

#[test]
fn test_clear() {
    let mut db = Database::open_in_memory().unwrap();
    db.save_state(&sample_state()).unwrap();
    db.clear().unwrap();
    assert!(db.load_state().unwrap().is_none());
}

#[test]
fn test_open_creates_file_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vowbudget.db");

    {
        let mut db = Database::open(&path).unwrap();
        db.save_state(&sample_state()).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let loaded = db.load_state().unwrap().unwrap();
    assert_eq!(loaded.region, "Texas");
    assert_eq!(loaded.currency, Currency::Gbp);
}
