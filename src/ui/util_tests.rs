#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;
use crate::models::Currency;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Venue", 10), "Venue");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("Venue", 5), "Venue");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Wedding Planner", 8), "Wedding…");
}

#[test]
fn test_truncate_empty() {
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Venue", 0), "");
}

#[test]
fn test_truncate_unicode() {
    // Japanese characters are multi-byte UTF-8
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("Venue", 1), "…");
}

#[test]
fn test_truncate_single_char_string() {
    assert_eq!(truncate("a", 1), "a");
    assert_eq!(truncate("a", 5), "a");
}

// ── format_amount ──────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56), Currency::Usd), "$1,234.56");
}

#[test]
fn test_format_amount_no_commas() {
    assert_eq!(format_amount(dec!(999.99), Currency::Usd), "$999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0), Currency::Usd), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50), Currency::Usd), "-$42.50");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(
        format_amount(dec!(1234567.89), Currency::Usd),
        "$1,234,567.89"
    );
}

#[test]
fn test_format_amount_rounds_to_two_decimals() {
    assert_eq!(format_amount(dec!(1.5), Currency::Usd), "$1.50");
}

#[test]
fn test_format_amount_converts_to_eur() {
    // 2600 / 0.84 = 3095.238…, shown to two places.
    assert_eq!(format_amount(dec!(2600), Currency::Eur), "€3,095.24");
}

#[test]
fn test_format_amount_converts_to_gbp() {
    assert_eq!(format_amount(dec!(720), Currency::Gbp), "£1,000.00");
}

#[test]
fn test_format_amount_converts_to_jpy() {
    assert_eq!(format_amount(dec!(11014), Currency::Jpy), "¥100.00");
}
