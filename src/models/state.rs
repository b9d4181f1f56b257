use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{AmountSet, Currency};

/// The whole plan: everything that gets persisted as one snapshot.
///
/// Created on first successful calculation, replaced (never mutated in place)
/// by each state transition in `crate::alloc`, and written back to storage by
/// the caller after every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetState {
    pub total_budget: Decimal,
    pub region: String,
    pub locality: String,
    pub allocations: AmountSet,
    pub currency: Currency,
    pub event_date: NaiveDate,
    pub actual_expenses: AmountSet,
    pub custom_categories: Vec<String>,
}

impl BudgetState {
    pub fn new(
        total_budget: Decimal,
        region: String,
        locality: String,
        allocations: AmountSet,
        currency: Currency,
        event_date: NaiveDate,
    ) -> Self {
        Self {
            total_budget,
            region,
            locality,
            allocations,
            currency,
            event_date,
            actual_expenses: AmountSet::new(),
            custom_categories: Vec::new(),
        }
    }

    pub fn is_custom(&self, category: &str) -> bool {
        self.custom_categories.iter().any(|c| c == category)
    }
}
