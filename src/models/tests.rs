#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── AmountSet ─────────────────────────────────────────────────

#[test]
fn test_amount_set_insertion_order() {
    let mut set = AmountSet::new();
    set.set("Venue", dec!(2600));
    set.set("Catering", dec!(2500));
    set.set("Favors", dec!(200));

    let names: Vec<&str> = set.categories().collect();
    assert_eq!(names, vec!["Venue", "Catering", "Favors"]);
}

#[test]
fn test_amount_set_update_keeps_position() {
    let mut set = AmountSet::new();
    set.set("Venue", dec!(2600));
    set.set("Catering", dec!(2500));
    set.set("Venue", dec!(3600));

    let names: Vec<&str> = set.categories().collect();
    assert_eq!(names, vec!["Venue", "Catering"]);
    assert_eq!(set.get("Venue"), Some(dec!(3600)));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_amount_set_remove() {
    let mut set = AmountSet::new();
    set.set("Venue", dec!(2600));
    set.set("Catering", dec!(2500));

    assert_eq!(set.remove("Venue"), Some(dec!(2600)));
    assert_eq!(set.remove("Venue"), None);
    assert!(!set.contains("Venue"));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_amount_set_get_or_zero() {
    let mut set = AmountSet::new();
    set.set("Flowers", dec!(700));

    assert_eq!(set.get_or_zero("Flowers"), dec!(700));
    assert_eq!(set.get_or_zero("Nonexistent"), Decimal::ZERO);
}

#[test]
fn test_amount_set_total() {
    let mut set = AmountSet::new();
    assert_eq!(set.total(), Decimal::ZERO);
    set.set("Venue", dec!(2600));
    set.set("Catering", dec!(2500));
    assert_eq!(set.total(), dec!(5100));
}

// ── Currency ──────────────────────────────────────────────────

#[test]
fn test_currency_parse() {
    assert_eq!(Currency::parse("usd"), Some(Currency::Usd));
    assert_eq!(Currency::parse(" EUR "), Some(Currency::Eur));
    assert_eq!(Currency::parse("gbp"), Some(Currency::Gbp));
    assert_eq!(Currency::parse("JPY"), Some(Currency::Jpy));
    assert_eq!(Currency::parse("CAD"), None);
}

#[test]
fn test_currency_display() {
    assert_eq!(Currency::Usd.display(dec!(2600)), "$2600.00");
    assert_eq!(Currency::Eur.display(dec!(84)), "€100.00");
    assert_eq!(Currency::Gbp.display(dec!(0)), "£0.00");
}

/// Parsing a displayed amount back (symbol stripped) must land within one
/// cent of `amount / rate` for every currency.
#[test]
fn test_currency_display_round_trip() {
    let amounts = [dec!(0.01), dec!(123.45), dec!(2600), dec!(10000)];
    for &currency in Currency::all() {
        for amount in amounts {
            let shown = currency.display(amount);
            let stripped = shown.trim_start_matches(currency.symbol());
            let parsed: Decimal = stripped.parse().unwrap();
            let expected = amount / currency.rate();
            assert!(
                (parsed - expected).abs() < dec!(0.01),
                "{currency}: {shown} parsed to {parsed}, expected ~{expected}"
            );
        }
    }
}

// ── BudgetState ───────────────────────────────────────────────

#[test]
fn test_state_is_custom() {
    let mut state = BudgetState::new(
        dec!(10000),
        "Texas".into(),
        "Austin".into(),
        AmountSet::new(),
        Currency::Usd,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    );
    assert!(!state.is_custom("Venue"));
    state.custom_categories.push("Fireworks".into());
    assert!(state.is_custom("Fireworks"));
}
