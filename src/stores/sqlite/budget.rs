//! Implements a SQLite backed budget limit store.
use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Amount, BudgetLimit, CategoryName},
    stores::BudgetStore,
};

/// Stores per-category budget limits in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl BudgetStore for SQLiteBudgetStore {
    /// Set the limit for a category, replacing any existing limit.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn set_limit(&mut self, limit: BudgetLimit) -> Result<(), Error> {
        self.connection.lock().unwrap().execute(
            "INSERT INTO budget_limit (category, spending_limit) VALUES (?1, ?2)
             ON CONFLICT(category) DO UPDATE SET spending_limit = excluded.spending_limit",
            (limit.category.as_ref(), limit.limit.to_string()),
        )?;

        Ok(())
    }

    /// Retrieve the limit for a category.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn get_limit(&self, category: &CategoryName) -> Result<Option<BudgetLimit>, Error> {
        let limit = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT category, spending_limit FROM budget_limit WHERE category = :category")?
            .query_row(&[(":category", category.as_ref())], Self::map_row)
            .optional()?;

        Ok(limit)
    }

    /// Retrieve all configured limits, ordered by category name.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn get_all(&self) -> Result<Vec<BudgetLimit>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT category, spending_limit FROM budget_limit ORDER BY category ASC")?
            .query_map([], Self::map_row)?
            .map(|maybe_limit| maybe_limit.map_err(Error::SqlError))
            .collect()
    }
}

impl CreateTable for SQLiteBudgetStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget_limit (
                    category TEXT PRIMARY KEY,
                    spending_limit TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteBudgetStore {
    type ReturnType = BudgetLimit;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let category: String = row.get(offset)?;
        let category = CategoryName::new_unchecked(&category);

        let limit: String = row.get(offset + 1)?;
        let limit = Decimal::from_str(&limit)
            .map_err(|error| {
                rusqlite::Error::FromSqlConversionFailure(
                    offset + 1,
                    rusqlite::types::Type::Text,
                    Box::new(error),
                )
            })
            .and_then(|value| {
                Amount::new(value).map_err(|error| {
                    rusqlite::Error::FromSqlConversionFailure(
                        offset + 1,
                        rusqlite::types::Type::Text,
                        Box::new(error),
                    )
                })
            })?;

        Ok(BudgetLimit { category, limit })
    }
}
