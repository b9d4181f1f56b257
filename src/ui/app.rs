use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::alloc::{self, LocationTable, ValidationError};
use crate::db::Database;
use crate::models::{BudgetState, Currency};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Setup,
    Allocations,
    Comparison,
    Timeline,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Setup,
            Self::Allocations,
            Self::Comparison,
            Self::Timeline,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => write!(f, "Setup"),
            Self::Allocations => write!(f, "Allocations"),
            Self::Comparison => write!(f, "Comparison"),
            Self::Timeline => write!(f, "Timeline"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// What the Editing-mode input buffer is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditTarget {
    Budget,
    EventDate,
    Allocation(String),
    Expense(String),
    NewCategory,
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    RemoveCategory { name: String },
    ResetPlan,
}

/// Setup form fields, top to bottom.
pub(crate) const SETUP_BUDGET: usize = 0;
pub(crate) const SETUP_CURRENCY: usize = 1;
pub(crate) const SETUP_REGION: usize = 2;
pub(crate) const SETUP_LOCALITY: usize = 3;
pub(crate) const SETUP_DATE: usize = 4;
pub(crate) const SETUP_CALCULATE: usize = 5;

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    /// The plan; `None` until the first successful calculation.
    pub(crate) state: Option<BudgetState>,

    // Setup form
    pub(crate) setup_field: usize,
    pub(crate) budget_input: String,
    pub(crate) date_input: String,
    pub(crate) currency_index: usize,
    pub(crate) region_index: usize,
    pub(crate) locality_index: usize,

    // Category list cursor (Allocations / Comparison / Timeline)
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Editing
    pub(crate) edit_target: Option<EditTarget>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(saved: Option<BudgetState>) -> Self {
        let table = LocationTable::builtin();
        let mut app = Self {
            running: true,
            screen: if saved.is_some() {
                Screen::Allocations
            } else {
                Screen::Setup
            },
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            state: None,

            setup_field: 0,
            budget_input: String::new(),
            date_input: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            currency_index: 0,
            region_index: 0,
            locality_index: 0,

            category_index: 0,
            category_scroll: 0,

            edit_target: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };

        if let Some(state) = saved {
            app.budget_input = state.total_budget.to_string();
            app.date_input = state.event_date.format("%Y-%m-%d").to_string();
            app.currency_index = Currency::all()
                .iter()
                .position(|c| *c == state.currency)
                .unwrap_or(0);
            app.region_index = table
                .regions()
                .position(|r| r == state.region)
                .unwrap_or(0);
            app.locality_index = table
                .localities(&state.region)
                .and_then(|mut names| names.position(|l| l == state.locality))
                .unwrap_or(0);
            app.state = Some(state);
        }

        app
    }

    pub(crate) fn table(&self) -> &'static LocationTable {
        LocationTable::builtin()
    }

    // ── Setup form accessors ──────────────────────────────────

    pub(crate) fn selected_currency(&self) -> Currency {
        Currency::all()
            .get(self.currency_index)
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn selected_region(&self) -> &'static str {
        self.table()
            .regions()
            .nth(self.region_index)
            .unwrap_or("New York")
    }

    pub(crate) fn selected_locality(&self) -> &'static str {
        self.table()
            .localities(self.selected_region())
            .and_then(|mut names| names.nth(self.locality_index))
            .unwrap_or("New York")
    }

    /// Cycle an enumerated setup field. Changing the region resets the
    /// locality, since localities belong to a region.
    pub(crate) fn cycle_setup_field(&mut self, delta: i32) {
        match self.setup_field {
            SETUP_CURRENCY => {
                self.currency_index =
                    cycle(self.currency_index, delta, Currency::all().len());
            }
            SETUP_REGION => {
                let count = self.table().regions().count();
                self.region_index = cycle(self.region_index, delta, count);
                self.locality_index = 0;
            }
            SETUP_LOCALITY => {
                let count = self
                    .table()
                    .localities(self.selected_region())
                    .map(|names| names.count())
                    .unwrap_or(1);
                self.locality_index = cycle(self.locality_index, delta, count);
            }
            _ => {}
        }
    }

    // ── State transitions (pure alloc call, then explicit save) ──

    /// Run the Setup form: validate, allocate, persist, show results.
    pub(crate) fn calculate(&mut self, db: &mut Database) -> Result<()> {
        let Ok(total) = Decimal::from_str(self.budget_input.trim()) else {
            self.set_status(ValidationError::InvalidBudget.to_string());
            return Ok(());
        };

        // An unparsable date falls back to today, like the calendar widget
        // it replaces; only budget and location can actually fail.
        let event_date = NaiveDate::parse_from_str(self.date_input.trim(), "%Y-%m-%d")
            .unwrap_or_else(|_| Local::now().date_naive());

        match alloc::build_state(
            total,
            self.selected_region(),
            self.selected_locality(),
            self.selected_currency(),
            event_date,
            self.table(),
        ) {
            Ok(state) => {
                let n = state.allocations.len();
                db.save_state(&state)?;
                self.state = Some(state);
                self.category_index = 0;
                self.category_scroll = 0;
                self.screen = Screen::Allocations;
                self.set_status(format!("Allocated across {n} categories"));
            }
            Err(e) => self.set_status(e.to_string()),
        }
        Ok(())
    }

    /// Set one category to an exact amount, rebalancing the rest.
    pub(crate) fn apply_allocation(
        &mut self,
        db: &mut Database,
        category: &str,
        new_value: Decimal,
    ) -> Result<()> {
        let Some(state) = &self.state else {
            return Ok(());
        };
        if !state.allocations.contains(category) {
            self.set_status(format!("No category named '{category}'"));
            return Ok(());
        }
        let next = alloc::apply_allocation(state, category, new_value.max(Decimal::ZERO));
        db.save_state(&next)?;
        let shown = next.currency.display(new_value.max(Decimal::ZERO));
        self.state = Some(next);
        self.set_status(format!("{category} set to {shown}, others rebalanced"));
        Ok(())
    }

    /// Nudge the selected category by `steps` slider increments.
    pub(crate) fn step_allocation(&mut self, db: &mut Database, steps: i32) -> Result<()> {
        let Some(category) = self.selected_category() else {
            return Ok(());
        };
        let Some(state) = &self.state else {
            return Ok(());
        };
        let current = state.allocations.get_or_zero(&category);
        // Nudges move in steps of 10 base units, like the slider they replace.
        let new_value = (current + Decimal::from(steps * 10)).max(Decimal::ZERO);
        self.apply_allocation(db, &category, new_value)
    }

    pub(crate) fn record_expense(
        &mut self,
        db: &mut Database,
        category: &str,
        input: &str,
    ) -> Result<()> {
        let Some(state) = &self.state else {
            return Ok(());
        };
        if !state.allocations.contains(category) {
            self.set_status(format!("No category named '{category}'"));
            return Ok(());
        }
        let next = alloc::record_expense(state, category, input);
        db.save_state(&next)?;
        let shown = next
            .currency
            .display(next.actual_expenses.get_or_zero(category));
        self.state = Some(next);
        self.set_status(format!("Recorded {shown} spent on {category}"));
        Ok(())
    }

    pub(crate) fn add_category(&mut self, db: &mut Database, name: &str) -> Result<()> {
        let Some(state) = &self.state else {
            return Ok(());
        };
        let next = alloc::add_category(state, name);
        if next.allocations.len() == state.allocations.len() {
            self.set_status("Category name is empty or already exists");
            return Ok(());
        }
        db.save_state(&next)?;
        self.state = Some(next);
        self.set_status(format!("Added category: {}", name.trim()));
        Ok(())
    }

    pub(crate) fn remove_category(&mut self, db: &mut Database, name: &str) -> Result<()> {
        let Some(state) = &self.state else {
            return Ok(());
        };
        if !state.allocations.contains(name) {
            self.set_status(format!("No category named '{name}'"));
            return Ok(());
        }
        let next = alloc::remove_category(state, name);
        db.save_state(&next)?;
        self.state = Some(next);
        if self.category_index > 0 && self.category_index >= self.category_count() {
            self.category_index = self.category_count().saturating_sub(1);
        }
        self.set_status(format!("Removed category: {name}"));
        Ok(())
    }

    pub(crate) fn set_currency(&mut self, db: &mut Database, currency: Currency) -> Result<()> {
        self.currency_index = Currency::all()
            .iter()
            .position(|c| *c == currency)
            .unwrap_or(0);
        if let Some(state) = &self.state {
            let mut next = state.clone();
            next.currency = currency;
            db.save_state(&next)?;
            self.state = Some(next);
        }
        self.set_status(format!("Display currency: {currency}"));
        Ok(())
    }

    pub(crate) fn set_event_date(&mut self, db: &mut Database, date: NaiveDate) -> Result<()> {
        self.date_input = date.format("%Y-%m-%d").to_string();
        if let Some(state) = &self.state {
            let mut next = state.clone();
            next.event_date = date;
            db.save_state(&next)?;
            self.state = Some(next);
        }
        self.set_status(format!("Event date: {}", date.format("%B %-d, %Y")));
        Ok(())
    }

    /// Change the total and redistribute from the location table, carrying
    /// expenses and custom categories over (customs restart at zero).
    pub(crate) fn set_total_budget(&mut self, db: &mut Database, total: Decimal) -> Result<()> {
        let Some(state) = self.state.clone() else {
            self.budget_input = total.to_string();
            self.set_status("Budget noted - run Calculate from Setup");
            return Ok(());
        };

        match alloc::compute_allocations(total, &state.region, &state.locality, self.table()) {
            Ok(allocations) => {
                let mut next = state;
                next.total_budget = total;
                next.allocations = allocations;
                for name in next.custom_categories.clone() {
                    next.allocations.set(&name, Decimal::ZERO);
                }
                db.save_state(&next)?;
                let shown = next.currency.display(total);
                self.budget_input = total.to_string();
                self.state = Some(next);
                self.set_status(format!("Reallocated from a {shown} budget"));
            }
            Err(e) => self.set_status(e.to_string()),
        }
        Ok(())
    }

    pub(crate) fn reset_plan(&mut self, db: &mut Database) -> Result<()> {
        db.clear()?;
        self.state = None;
        self.screen = Screen::Setup;
        self.setup_field = 0;
        self.category_index = 0;
        self.category_scroll = 0;
        self.set_status("Plan cleared");
        Ok(())
    }

    // ── List helpers ──────────────────────────────────────────

    pub(crate) fn category_count(&self) -> usize {
        self.state
            .as_ref()
            .map(|s| s.allocations.len())
            .unwrap_or(0)
    }

    pub(crate) fn selected_category(&self) -> Option<String> {
        let state = self.state.as_ref()?;
        state
            .allocations
            .categories()
            .nth(self.category_index)
            .map(String::from)
    }

    pub(crate) fn category_page(&self) -> usize {
        self.visible_rows.max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn cycle(index: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if delta > 0 {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}
