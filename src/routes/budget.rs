//! This file defines the routes for managing per-category budget limits.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    aggregation::{self, BudgetReport},
    models::{Amount, BudgetLimit, CategoryName},
    stores::{BudgetStore, ExpenseQuery, ExpenseStore},
};

/// The request body for setting a budget limit.
#[derive(Debug, Serialize, Deserialize)]
pub struct SetBudgetData {
    /// The category the limit applies to.
    pub category: String,
    /// The most that should be spent in the category, as a decimal string.
    pub limit: String,
}

/// A route handler for setting the budget limit of a category.
///
/// Setting a limit for a category that already has one replaces it.
pub async fn set_budget_endpoint<E, B>(
    State(mut state): State<AppState<E, B>>,
    Json(data): Json<SetBudgetData>,
) -> Result<StatusCode, Error>
where
    E: ExpenseStore + Send + Sync,
    B: BudgetStore + Send + Sync,
{
    let category = CategoryName::new(&data.category)?;
    let limit: Amount = data.limit.parse()?;

    state.budget_store.set_limit(BudgetLimit { category, limit })?;

    Ok(StatusCode::OK)
}

/// The response body of the budget list endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetListResponse {
    /// All configured limits, ordered by category name.
    pub budgets: Vec<BudgetLimit>,
}

/// A route handler for listing all configured budget limits.
pub async fn get_budgets_endpoint<E, B>(
    State(state): State<AppState<E, B>>,
) -> Result<Json<BudgetListResponse>, Error>
where
    E: ExpenseStore + Send + Sync,
    B: BudgetStore + Send + Sync,
{
    let budgets = state.budget_store.get_all()?;

    Ok(Json(BudgetListResponse { budgets }))
}

/// A route handler for checking a category's spending against its budget
/// limit.
pub async fn get_budget_status_endpoint<E, B>(
    State(state): State<AppState<E, B>>,
    Path(category): Path<String>,
) -> Result<Json<BudgetReport>, Error>
where
    E: ExpenseStore + Send + Sync,
    B: BudgetStore + Send + Sync,
{
    let category = CategoryName::new(&category)?;

    let limit = state.budget_store.get_limit(&category)?;
    let expenses = state.expense_store.get_query(ExpenseQuery {
        category: Some(category),
        ..Default::default()
    })?;

    Ok(Json(aggregation::budget_report(limit.as_ref(), &expenses)))
}
