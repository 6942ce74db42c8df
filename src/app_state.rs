//! Implements a struct that holds the state of the REST server.

use std::marker::{Send, Sync};

use axum::extract::FromRef;

use crate::stores::{BudgetStore, ExpenseStore};

/// The state of the REST server.
///
/// The stores are injected when the state is constructed at startup; request
/// handlers receive clones of this state and the clones share the underlying
/// records.
#[derive(Debug, Clone)]
pub struct AppState<E, B>
where
    E: ExpenseStore + Send + Sync,
    B: BudgetStore + Send + Sync,
{
    /// The store for expense records.
    pub expense_store: E,
    /// The store for per-category budget limits.
    pub budget_store: B,
}

impl<E, B> AppState<E, B>
where
    E: ExpenseStore + Send + Sync,
    B: BudgetStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(expense_store: E, budget_store: B) -> Self {
        Self {
            expense_store,
            budget_store,
        }
    }
}

/// The state needed to create, query, and mutate expenses.
#[derive(Debug, Clone)]
pub struct ExpenseState<E>
where
    E: ExpenseStore + Send + Sync,
{
    /// The store for expense records.
    pub expense_store: E,
}

impl<E, B> FromRef<AppState<E, B>> for ExpenseState<E>
where
    E: ExpenseStore + Clone + Send + Sync,
    B: BudgetStore + Send + Sync,
{
    fn from_ref(state: &AppState<E, B>) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}
