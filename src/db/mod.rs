mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{AmountSet, BudgetState, Currency};

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Snapshot persistence ──────────────────────────────────

    /// Replace the whole stored plan with `state`, atomically.
    pub(crate) fn save_state(&mut self, state: &BudgetState) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM plan", [])?;
        tx.execute("DELETE FROM allocations", [])?;
        tx.execute("DELETE FROM actual_expenses", [])?;
        tx.execute("DELETE FROM custom_categories", [])?;

        tx.execute(
            "INSERT INTO plan (id, total_budget, region, locality, currency, event_date, saved_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                state.total_budget.to_string(),
                state.region,
                state.locality,
                state.currency.code(),
                state.event_date.format("%Y-%m-%d").to_string(),
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;

        for (position, (category, amount)) in state.allocations.iter().enumerate() {
            tx.execute(
                "INSERT INTO allocations (position, category, amount) VALUES (?1, ?2, ?3)",
                params![position as i64, category, amount.to_string()],
            )?;
        }
        for (category, amount) in state.actual_expenses.iter() {
            tx.execute(
                "INSERT INTO actual_expenses (category, amount) VALUES (?1, ?2)",
                params![category, amount.to_string()],
            )?;
        }
        for category in &state.custom_categories {
            tx.execute(
                "INSERT INTO custom_categories (category) VALUES (?1)",
                params![category],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Restore the last saved plan, or `None` on a fresh database.
    ///
    /// Optional fields default rather than fail: unknown currency reads as
    /// USD, an unparsable date as today, and missing expense/custom rows as
    /// empty sets.
    pub(crate) fn load_state(&self) -> Result<Option<BudgetState>> {
        let plan: Option<(String, String, String, String, String)> = self
            .conn
            .query_row(
                "SELECT total_budget, region, locality, currency, event_date FROM plan WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((total_str, region, locality, currency_code, date_str)) = plan else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare("SELECT category, amount FROM allocations ORDER BY position")?;
        let allocations: AmountSet = stmt
            .query_map([], |row| {
                let category: String = row.get(0)?;
                let amount: String = row.get(1)?;
                Ok((category, Decimal::from_str(&amount).unwrap_or_default()))
            })?
            .collect::<std::result::Result<_, _>>()?;

        let mut stmt = self
            .conn
            .prepare("SELECT category, amount FROM actual_expenses")?;
        let actual_expenses: AmountSet = stmt
            .query_map([], |row| {
                let category: String = row.get(0)?;
                let amount: String = row.get(1)?;
                Ok((category, Decimal::from_str(&amount).unwrap_or_default()))
            })?
            .collect::<std::result::Result<_, _>>()?;

        let mut stmt = self.conn.prepare("SELECT category FROM custom_categories")?;
        let custom_categories: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<_, _>>()?;

        Ok(Some(BudgetState {
            total_budget: Decimal::from_str(&total_str).unwrap_or_default(),
            region,
            locality,
            allocations,
            currency: Currency::parse(&currency_code).unwrap_or_default(),
            event_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .unwrap_or_else(|_| chrono::Local::now().date_naive()),
            actual_expenses,
            custom_categories,
        }))
    }

    /// Drop the stored plan entirely.
    pub(crate) fn clear(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM plan", [])?;
        tx.execute("DELETE FROM allocations", [])?;
        tx.execute("DELETE FROM actual_expenses", [])?;
        tx.execute("DELETE FROM custom_categories", [])?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
