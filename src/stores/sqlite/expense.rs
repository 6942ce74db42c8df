//! Implements a SQLite backed expense store.
use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use rust_decimal::Decimal;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Amount, CategoryName, Expense, ExpenseBuilder, ExpenseId, ExpenseUpdate},
    stores::{ExpenseQuery, ExpenseStore},
};

/// Stores expenses in a SQLite database.
///
/// Amounts are stored as text so that decimal values survive round-trips
/// exactly. Insertion order is the rowid order of the `expense` table.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    /// Create a new expense in the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn create(&mut self, builder: ExpenseBuilder) -> Result<Expense, Error> {
        let expense = builder.finalise(ExpenseId::generate());

        self.connection.lock().unwrap().execute(
            "INSERT INTO expense (id, amount, category, date, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                expense.id().to_string(),
                expense.amount().to_string(),
                expense.category().as_ref(),
                expense.date(),
                expense.description(),
            ),
        )?;

        Ok(expense)
    }

    /// Replace the fields of an expense that are present in `update`.
    ///
    /// The record is read, modified in memory, and written back under a
    /// single lock so that concurrent handlers cannot interleave.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a stored expense,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, id: ExpenseId, update: ExpenseUpdate) -> Result<Expense, Error> {
        let connection = self.connection.lock().unwrap();

        let mut expense = connection
            .prepare(
                "SELECT id, amount, category, date, description FROM expense WHERE id = :id",
            )?
            .query_row(&[(":id", &id.to_string())], Self::map_row)?;

        update.apply(&mut expense);

        connection.execute(
            "UPDATE expense SET amount = ?1, category = ?2, date = ?3, description = ?4
             WHERE id = ?5",
            (
                expense.amount().to_string(),
                expense.category().as_ref(),
                expense.date(),
                expense.description(),
                expense.id().to_string(),
            ),
        )?;

        Ok(expense)
    }

    /// Remove an expense from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a stored expense,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: ExpenseId) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM expense WHERE id = ?1", [id.to_string()])?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Retrieve an expense in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a stored expense,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        let expense = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, amount, category, date, description FROM expense WHERE id = :id",
            )?
            .query_row(&[(":id", &id.to_string())], Self::map_row)?;

        Ok(expense)
    }

    /// Query for expenses in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL
    /// error.
    fn get_query(&self, query: ExpenseQuery) -> Result<Vec<Expense>, Error> {
        let mut query_string_parts =
            vec!["SELECT id, amount, category, date, description FROM expense".to_string()];
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(start_date) = query.start_date {
            where_clause_parts.push(format!("date >= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(start_date.to_string()));
        }

        if let Some(end_date) = query.end_date {
            where_clause_parts.push(format!("date <= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(end_date.to_string()));
        }

        if let Some(category) = &query.category {
            where_clause_parts.push(format!("category = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(category.as_ref().to_string()));
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        query_string_parts.push("ORDER BY rowid ASC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
            .collect()
    }

    /// Get the total number of expenses in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is some SQL
    /// error.
    fn count(&self) -> Result<usize, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(id) FROM expense;", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as usize)
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteExpenseStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS expense (
                    id TEXT PRIMARY KEY,
                    amount TEXT NOT NULL,
                    category TEXT NOT NULL,
                    date TEXT NOT NULL,
                    description TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteExpenseStore {
    type ReturnType = Expense;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id: String = row.get(offset)?;
        let id = ExpenseId::from_str(&id).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                offset,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;

        let amount: String = row.get(offset + 1)?;
        let amount = Decimal::from_str(&amount).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 1,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;
        let amount = Amount::new(amount).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 1,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;

        let category: String = row.get(offset + 2)?;
        let category = CategoryName::new_unchecked(&category);

        let date = row.get(offset + 3)?;
        let description = row.get(offset + 4)?;

        Ok(Expense::new_unchecked(id, amount, category, date, description))
    }
}
