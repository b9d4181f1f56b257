#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn austin_allocations() -> AmountSet {
    compute_allocations(dec!(10000), "Texas", "Austin", LocationTable::builtin()).unwrap()
}

fn austin_state() -> BudgetState {
    build_state(
        dec!(10000),
        "Texas",
        "Austin",
        Currency::Usd,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        LocationTable::builtin(),
    )
    .unwrap()
}

// ── compute_allocations ───────────────────────────────────────

#[test]
fn test_austin_golden_scenario() {
    let allocations = austin_allocations();
    let expected = [
        ("Venue", dec!(2600.00)),
        ("Catering", dec!(2500.00)),
        ("Photography", dec!(1200.00)),
        ("Attire", dec!(800.00)),
        ("Flowers", dec!(700.00)),
        ("Music", dec!(600.00)),
        ("Invitations", dec!(300.00)),
        ("Favors", dec!(200.00)),
        ("Wedding Planner", dec!(500.00)),
        ("Miscellaneous", dec!(600.00)),
    ];
    for (category, amount) in expected {
        assert_eq!(allocations.get(category), Some(amount), "{category}");
    }
    assert_eq!(allocations.total(), dec!(10000.00));
}

#[test]
fn test_allocation_order_follows_table() {
    let allocations = austin_allocations();
    let names: Vec<&str> = allocations.categories().collect();
    assert_eq!(names[0], "Venue");
    assert_eq!(names[9], "Miscellaneous");
}

/// The sum of allocations equals total × (table percentage sum) / 100 for
/// every built-in locality, whatever that sum happens to be.
#[test]
fn test_allocation_sum_matches_table_weight() {
    let table = LocationTable::builtin();
    let total = dec!(7321.50);
    for region in table.regions() {
        for locality in table.localities(region).unwrap() {
            let pct_sum: u32 = table
                .percentages(region, locality)
                .unwrap()
                .iter()
                .map(|(_, pct)| pct)
                .sum();
            let allocations = compute_allocations(total, region, locality, table).unwrap();
            let expected = total * Decimal::from(pct_sum) / dec!(100);
            assert!(
                (allocations.total() - expected).abs() < dec!(0.0001),
                "{region}/{locality}"
            );
        }
    }
}

#[test]
fn test_invalid_budget() {
    let table = LocationTable::builtin();
    assert_eq!(
        compute_allocations(Decimal::ZERO, "Texas", "Austin", table),
        Err(ValidationError::InvalidBudget)
    );
    assert_eq!(
        compute_allocations(dec!(-50), "Texas", "Austin", table),
        Err(ValidationError::InvalidBudget)
    );
}

#[test]
fn test_invalid_location() {
    let table = LocationTable::builtin();
    assert_eq!(
        compute_allocations(dec!(10000), "Texas", "Dallas", table),
        Err(ValidationError::InvalidLocation)
    );
    assert_eq!(
        compute_allocations(dec!(10000), "Ohio", "Austin", table),
        Err(ValidationError::InvalidLocation)
    );
}

#[test]
fn test_location_lookup_case_insensitive() {
    let table = LocationTable::builtin();
    let allocations = compute_allocations(dec!(10000), "texas", "AUSTIN", table).unwrap();
    assert_eq!(allocations.get("Venue"), Some(dec!(2600.00)));
}

#[test]
fn test_build_state_canonicalizes_location() {
    let state = build_state(
        dec!(10000),
        "texas",
        "austin",
        Currency::Usd,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        LocationTable::builtin(),
    )
    .unwrap();
    assert_eq!(state.region, "Texas");
    assert_eq!(state.locality, "Austin");
}

// ── rebalance ─────────────────────────────────────────────────

#[test]
fn test_rebalance_venue_golden_scenario() {
    let before = austin_allocations();
    let after = rebalance(&before, "Venue", dec!(3600.00));

    assert_eq!(after.get("Venue"), Some(dec!(3600.00)));
    // Every other category shrinks in proportion to its prior share of the
    // remaining 7400.
    let delta = dec!(1000);
    let total_others = dec!(7400);
    for (category, old_amount) in before.iter() {
        if category == "Venue" {
            continue;
        }
        let expected = old_amount - delta * (old_amount / total_others);
        let got = after.get(category).unwrap();
        assert!(
            (got - expected).abs() < dec!(0.0001),
            "{category}: {got} vs {expected}"
        );
        assert!(got < old_amount, "{category} should have shrunk");
    }
    assert!((after.total() - dec!(10000)).abs() < dec!(0.0001));
}

#[test]
fn test_rebalance_preserves_total() {
    let before = austin_allocations();
    for (category, new_value) in [
        ("Favors", dec!(0)),
        ("Catering", dec!(5000)),
        ("Miscellaneous", dec!(612.34)),
    ] {
        let after = rebalance(&before, category, new_value);
        assert!(
            (after.total() - before.total()).abs() < dec!(0.0001),
            "{category} -> {new_value}"
        );
    }
}

#[test]
fn test_rebalance_decrease_grows_others() {
    let before = austin_allocations();
    let after = rebalance(&before, "Venue", dec!(1600.00));
    for (category, old_amount) in before.iter() {
        if category != "Venue" {
            assert!(after.get(category).unwrap() > old_amount, "{category}");
        }
    }
}

/// Zero-sum others: the changed category absorbs the whole delta, nothing
/// divides by zero, and the other categories are untouched.
#[test]
fn test_rebalance_zero_other_total() {
    let mut current = AmountSet::new();
    current.set("Venue", dec!(5000));
    current.set("Catering", dec!(0));
    current.set("Flowers", dec!(0));

    let after = rebalance(&current, "Venue", dec!(3000));
    assert_eq!(after.get("Venue"), Some(dec!(3000)));
    assert_eq!(after.get("Catering"), Some(dec!(0)));
    assert_eq!(after.get("Flowers"), Some(dec!(0)));
}

#[test]
fn test_rebalance_unknown_category_is_noop() {
    let before = austin_allocations();
    let after = rebalance(&before, "Skydiving", dec!(1000));
    assert_eq!(after, before);
}

#[test]
fn test_rebalance_allows_negative_allocations() {
    let mut current = AmountSet::new();
    current.set("Venue", dec!(100));
    current.set("Favors", dec!(10));
    current.set("Music", dec!(10));

    // Delta of 100 against 20 of others drives them negative; the total is
    // still preserved.
    let after = rebalance(&current, "Venue", dec!(200));
    assert!(after.get("Favors").unwrap() < Decimal::ZERO);
    assert!((after.total() - dec!(120)).abs() < dec!(0.0001));
}

// ── expenses ──────────────────────────────────────────────────

#[test]
fn test_record_expense() {
    let state = austin_state();
    let state = record_expense(&state, "Venue", "2750.50");
    assert_eq!(state.actual_expenses.get("Venue"), Some(dec!(2750.50)));
}

#[test]
fn test_record_expense_unparsable_stores_zero() {
    let state = austin_state();
    let state = record_expense(&state, "Venue", "lots");
    assert_eq!(state.actual_expenses.get("Venue"), Some(Decimal::ZERO));
}

#[test]
fn test_record_expense_negative_clamps_to_zero() {
    let state = austin_state();
    let state = record_expense(&state, "Venue", "-40");
    assert_eq!(state.actual_expenses.get("Venue"), Some(Decimal::ZERO));
}

#[test]
fn test_expense_may_exceed_allocation() {
    let state = austin_state();
    let state = record_expense(&state, "Favors", "9999");
    assert_eq!(state.actual_expenses.get("Favors"), Some(dec!(9999)));
}

// ── custom categories ─────────────────────────────────────────

#[test]
fn test_add_category() {
    let state = austin_state();
    let state = add_category(&state, "Fireworks");
    assert_eq!(state.allocations.get("Fireworks"), Some(Decimal::ZERO));
    assert!(state.is_custom("Fireworks"));
    // No rebalance on add: the base total is untouched.
    assert_eq!(state.allocations.total(), dec!(10000.00));
}

#[test]
fn test_add_category_duplicate_or_empty_is_noop() {
    let state = austin_state();
    assert_eq!(add_category(&state, "Venue"), state);
    assert_eq!(add_category(&state, ""), state);
    assert_eq!(add_category(&state, "   "), state);
}

#[test]
fn test_add_then_remove_round_trips() {
    let before = austin_state();
    let after = remove_category(&add_category(&before, "Fireworks"), "Fireworks");
    assert_eq!(after, before);
}

#[test]
fn test_remove_base_category_allowed() {
    let state = austin_state();
    let state = remove_category(&state, "Favors");
    assert!(!state.allocations.contains("Favors"));
}

#[test]
fn test_remove_drops_expense() {
    let state = austin_state();
    let state = record_expense(&state, "Favors", "150");
    let state = remove_category(&state, "Favors");
    assert!(!state.actual_expenses.contains("Favors"));
}

// ── timeline ──────────────────────────────────────────────────

#[test]
fn test_booking_offsets() {
    assert_eq!(booking_offset_days("Venue"), 365);
    assert_eq!(booking_offset_days("Wedding Planner"), 365);
    assert_eq!(booking_offset_days("Catering"), 270);
    assert_eq!(booking_offset_days("Attire"), 240);
    assert_eq!(booking_offset_days("Invitations"), 120);
    assert_eq!(booking_offset_days("Favors"), 90);
    assert_eq!(booking_offset_days("Fireworks"), 180);
}

#[test]
fn test_suggested_booking_date_golden() {
    let event = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    assert_eq!(
        suggested_booking_date(event, "Favors"),
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    );
    assert_eq!(
        suggested_booking_date(event, "Venue"),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    );
}

#[test]
fn test_validation_error_messages() {
    assert_eq!(
        ValidationError::InvalidBudget.to_string(),
        "Please enter a valid budget amount"
    );
    assert_eq!(
        ValidationError::InvalidLocation.to_string(),
        "Please select a valid region and locality combination"
    );
}
