mod amounts;
mod currency;
mod state;

pub use amounts::AmountSet;
pub use currency::Currency;
pub use state::BudgetState;

#[cfg(test)]
mod tests;
