//! SQLite backed implementations of the store traits.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize};

mod budget;
mod expense;

pub use budget::SQLiteBudgetStore;
pub use expense::SQLiteExpenseStore;

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteExpenseStore, SQLiteBudgetStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the
/// domain models.
pub fn create_app_state(db_connection: Connection) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let expense_store = SQLiteExpenseStore::new(connection.clone());
    let budget_store = SQLiteBudgetStore::new(connection);

    Ok(AppState::new(expense_store, budget_store))
}
