//! This file defines the routes for creating, listing, updating, and
//! deleting expenses.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, ExpenseState,
    models::{Amount, CategoryName, Expense, ExpenseId, ExpenseUpdate},
    stores::{ExpenseQuery, ExpenseStore},
};

/// The request body for creating an expense.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExpenseData {
    /// The value of the expense as a decimal string, e.g. "45.99".
    pub amount: String,
    /// The label used to group the expense, e.g. "Groceries".
    pub category: String,
    /// The day the expense occurred. Defaults to today when omitted.
    #[serde(default)]
    pub date: Option<Date>,
    /// Text detailing the expense.
    #[serde(default)]
    pub description: Option<String>,
}

/// The response body returned after creating an expense.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExpenseResponse {
    /// The id assigned to the new expense.
    pub id: ExpenseId,
}

/// A route handler for creating a new expense.
///
/// The amount and category are validated before the store is touched, so a
/// rejected request never changes the record count.
pub async fn create_expense_endpoint<E>(
    State(mut state): State<ExpenseState<E>>,
    Json(data): Json<CreateExpenseData>,
) -> Result<impl IntoResponse, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let amount: Amount = data.amount.parse()?;
    let category = CategoryName::new(&data.category)?;

    let mut builder = Expense::build(amount, category);

    if let Some(date) = data.date {
        builder = builder.date(date);
    }

    if let Some(description) = data.description {
        builder = builder.description(&description);
    }

    let expense = state.expense_store.create(builder)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateExpenseResponse { id: expense.id() }),
    ))
}

/// The request body for updating an expense. All fields are optional;
/// omitted fields keep their current values.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateExpenseData {
    /// The new amount as a decimal string.
    #[serde(default)]
    pub amount: Option<String>,
    /// The new category.
    #[serde(default)]
    pub category: Option<String>,
    /// The new date.
    #[serde(default)]
    pub date: Option<Date>,
    /// The new description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A route handler for updating an existing expense.
///
/// Returns the full updated expense on success and 404 if the id does not
/// refer to a stored expense.
pub async fn update_expense_endpoint<E>(
    State(mut state): State<ExpenseState<E>>,
    Path(expense_id): Path<ExpenseId>,
    Json(data): Json<UpdateExpenseData>,
) -> Result<Json<Expense>, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let mut update = ExpenseUpdate {
        date: data.date,
        description: data.description,
        ..Default::default()
    };

    if let Some(amount) = data.amount {
        update.amount = Some(amount.parse()?);
    }

    if let Some(category) = data.category {
        update.category = Some(CategoryName::new(&category)?);
    }

    let expense = state.expense_store.update(expense_id, update)?;

    Ok(Json(expense))
}

/// A route handler for deleting an expense by its id.
///
/// Returns 404 if the id does not refer to a stored expense.
pub async fn delete_expense_endpoint<E>(
    State(mut state): State<ExpenseState<E>>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<StatusCode, Error>
where
    E: ExpenseStore + Send + Sync,
{
    state.expense_store.delete(expense_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// The filter query parameters accepted by the expense list endpoint.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpenseFilterParams {
    /// Include expenses on or after this date.
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Include expenses on or before this date.
    #[serde(default)]
    pub end_date: Option<Date>,
    /// Include only expenses in this category.
    #[serde(default)]
    pub category: Option<String>,
}

impl TryFrom<ExpenseFilterParams> for ExpenseQuery {
    type Error = Error;

    fn try_from(params: ExpenseFilterParams) -> Result<Self, Self::Error> {
        let category = params
            .category
            .map(|name| CategoryName::new(&name))
            .transpose()?;

        Ok(ExpenseQuery {
            start_date: params.start_date,
            end_date: params.end_date,
            category,
        })
    }
}

/// The response body of the expense list endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    /// The expenses matching the filter, in insertion order.
    pub expenses: Vec<Expense>,
}

/// A route handler for listing expenses, optionally filtered by an inclusive
/// date range and a category.
pub async fn get_expenses_endpoint<E>(
    State(state): State<ExpenseState<E>>,
    Query(params): Query<ExpenseFilterParams>,
) -> Result<Json<ExpenseListResponse>, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let expenses = state.expense_store.get_query(params.try_into()?)?;

    Ok(Json(ExpenseListResponse { expenses }))
}
