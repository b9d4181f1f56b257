//! The budget allocator: every state transition is a pure function from the
//! old state (or the relevant slice of it) to a new value. Persistence is the
//! caller's job, invoked separately after the transition.

mod table;
mod timeline;

pub use table::LocationTable;
pub use timeline::{booking_offset_days, suggested_booking_date};

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{AmountSet, BudgetState, Currency};

/// The only two user-facing validation failures. Everything else in the
/// optional-input path falls back to a default instead of erroring.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid budget amount")]
    InvalidBudget,
    #[error("Please select a valid region and locality combination")]
    InvalidLocation,
}

/// Distribute a total budget across a locality's categories.
///
/// Each category receives `total × percentage / 100`. The result's order
/// follows the table's category order.
pub fn compute_allocations(
    total: Decimal,
    region: &str,
    locality: &str,
    table: &LocationTable,
) -> Result<AmountSet, ValidationError> {
    if total <= Decimal::ZERO {
        return Err(ValidationError::InvalidBudget);
    }
    let percentages = table
        .percentages(region, locality)
        .ok_or(ValidationError::InvalidLocation)?;

    let hundred = Decimal::from(100);
    Ok(percentages
        .iter()
        .map(|&(category, pct)| (category.to_string(), total * Decimal::from(pct) / hundred))
        .collect())
}

/// Build a fresh plan from user input, canonicalizing the location spelling.
pub fn build_state(
    total: Decimal,
    region: &str,
    locality: &str,
    currency: Currency,
    event_date: NaiveDate,
    table: &LocationTable,
) -> Result<BudgetState, ValidationError> {
    let allocations = compute_allocations(total, region, locality, table)?;
    let (region, locality) = table
        .canonical(region, locality)
        .ok_or(ValidationError::InvalidLocation)?;
    Ok(BudgetState::new(
        total,
        region.to_string(),
        locality.to_string(),
        allocations,
        currency,
        event_date,
    ))
}

/// Set one category to a new amount and spread the difference across all
/// other categories in proportion to their current share, so the overall
/// total is preserved.
///
/// When the other categories sum to zero there is no proportion to spread by;
/// the changed category absorbs the whole delta and the others stay put.
/// Amounts are not clamped at zero: a large enough delta can push other
/// categories negative, which keeps the sum invariant intact and is surfaced
/// in the UI rather than hidden.
pub fn rebalance(current: &AmountSet, changed: &str, new_value: Decimal) -> AmountSet {
    let Some(old_value) = current.get(changed) else {
        return current.clone();
    };
    let delta = new_value - old_value;
    let total_others: Decimal = current
        .iter()
        .filter(|(category, _)| *category != changed)
        .map(|(_, amount)| amount)
        .sum();

    current
        .iter()
        .map(|(category, amount)| {
            let updated = if category == changed {
                new_value
            } else if total_others.is_zero() {
                amount
            } else {
                amount - delta * (amount / total_others)
            };
            (category.to_string(), updated)
        })
        .collect()
}

/// Rebalance one category within a plan.
pub fn apply_allocation(state: &BudgetState, category: &str, new_value: Decimal) -> BudgetState {
    let mut next = state.clone();
    next.allocations = rebalance(&state.allocations, category, new_value);
    next
}

/// Record an actual expense from raw user input. Unparsable input stores
/// zero; negative input clamps to zero. Never an error.
pub fn record_expense(state: &BudgetState, category: &str, input: &str) -> BudgetState {
    let amount = Decimal::from_str(input.trim())
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let mut next = state.clone();
    next.actual_expenses.set(category, amount);
    next
}

/// Add a user-defined category with a zero allocation.
///
/// A no-op when the name is empty or already present. Deliberately does not
/// rebalance: the new category adds to, rather than redistributes from, the
/// planned total.
pub fn add_category(state: &BudgetState, name: &str) -> BudgetState {
    let name = name.trim();
    if name.is_empty() || state.allocations.contains(name) {
        return state.clone();
    }
    let mut next = state.clone();
    next.allocations.set(name, Decimal::ZERO);
    next.custom_categories.push(name.to_string());
    next
}

/// Remove a category by name. Any key can be removed, base categories
/// included; the category's actual expense is dropped with it.
pub fn remove_category(state: &BudgetState, name: &str) -> BudgetState {
    let mut next = state.clone();
    next.allocations.remove(name);
    next.actual_expenses.remove(name);
    next.custom_categories.retain(|c| c != name);
    next
}

#[cfg(test)]
mod tests;
