//! This file defines the routes for the balance and category summary
//! reports.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, ExpenseState, aggregation,
    models::CategoryName,
    stores::{ExpenseQuery, ExpenseStore},
};

/// The date-range query parameters accepted by the report endpoints.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReportParams {
    /// Include expenses on or after this date.
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Include expenses on or before this date.
    #[serde(default)]
    pub end_date: Option<Date>,
}

impl From<ReportParams> for ExpenseQuery {
    fn from(params: ReportParams) -> Self {
        ExpenseQuery {
            start_date: params.start_date,
            end_date: params.end_date,
            category: None,
        }
    }
}

/// The response body of the balance endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// The exact sum of the matching expense amounts.
    pub balance: Decimal,
}

/// A route handler for the total of all expense amounts, optionally
/// restricted to an inclusive date range.
pub async fn get_balance_endpoint<E>(
    State(state): State<ExpenseState<E>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<BalanceResponse>, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let expenses = state.expense_store.get_query(params.into())?;

    Ok(Json(BalanceResponse {
        balance: aggregation::total_balance(&expenses),
    }))
}

/// A route handler for per-category expense totals, optionally restricted to
/// an inclusive date range.
///
/// The response maps each category name to its exact total; categories with
/// no matching expenses are absent.
pub async fn get_summary_endpoint<E>(
    State(state): State<ExpenseState<E>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<BTreeMap<CategoryName, Decimal>>, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let expenses = state.expense_store.get_query(params.into())?;

    Ok(Json(aggregation::category_summary(&expenses)))
}
