//! This file defines the route for downloading all expenses as CSV.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    Error, ExpenseState,
    stores::{ExpenseQuery, ExpenseStore},
};

/// A route handler that renders every expense as a CSV download.
///
/// Amounts are written as exact decimal strings in the same format the JSON
/// API uses.
pub async fn export_csv_endpoint<E>(
    State(state): State<ExpenseState<E>>,
) -> Result<Response, Error>
where
    E: ExpenseStore + Send + Sync,
{
    let expenses = state.expense_store.get_query(ExpenseQuery::default())?;

    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["ID", "Amount", "Category", "Date", "Description"])
        .map_err(|error| Error::ExportError(error.to_string()))?;

    for expense in &expenses {
        writer
            .write_record([
                expense.id().to_string(),
                expense.amount().to_string(),
                expense.category().to_string(),
                expense.date().to_string(),
                expense.description().to_string(),
            ])
            .map_err(|error| Error::ExportError(error.to_string()))?;
    }

    let body = writer
        .into_inner()
        .map_err(|error| Error::ExportError(error.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}
