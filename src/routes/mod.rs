//! Application router configuration and route handlers for the JSON API.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::{
    AppState, logging_middleware,
    stores::{BudgetStore, ExpenseStore},
};

mod budget;
pub mod endpoints;
mod expense;
mod export;
mod report;

pub use budget::{
    BudgetListResponse, SetBudgetData, get_budget_status_endpoint, get_budgets_endpoint,
    set_budget_endpoint,
};
pub use expense::{
    CreateExpenseData, CreateExpenseResponse, ExpenseFilterParams, ExpenseListResponse,
    UpdateExpenseData, create_expense_endpoint, delete_expense_endpoint, get_expenses_endpoint,
    update_expense_endpoint,
};
pub use export::export_csv_endpoint;
pub use report::{
    BalanceResponse, ReportParams, get_balance_endpoint, get_summary_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router<E, B>(state: AppState<E, B>) -> Router
where
    E: ExpenseStore + Clone + Send + Sync + 'static,
    B: BudgetStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::EXPENSES,
            post(create_expense_endpoint::<E>).get(get_expenses_endpoint::<E>),
        )
        .route(
            endpoints::EXPENSE,
            put(update_expense_endpoint::<E>).delete(delete_expense_endpoint::<E>),
        )
        .route(endpoints::BALANCE, get(get_balance_endpoint::<E>))
        .route(endpoints::SUMMARY, get(get_summary_endpoint::<E>))
        .route(
            endpoints::BUDGETS,
            post(set_budget_endpoint::<E, B>).get(get_budgets_endpoint::<E, B>),
        )
        .route(
            endpoints::BUDGET_STATUS,
            get(get_budget_status_endpoint::<E, B>),
        )
        .route(endpoints::EXPORT, get(export_csv_endpoint::<E>))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
