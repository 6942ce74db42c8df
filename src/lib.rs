//! Spendtrack is a web service for recording day-to-day expenses.
//!
//! This library provides a JSON REST API over a validated expense store with
//! balance and per-category reporting, optional SQLite persistence, and
//! per-category budget limits.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

pub mod aggregation;
mod app_state;
mod db;
mod logging;
pub mod models;
pub mod routes;
pub mod stores;

pub use app_state::{AppState, ExpenseState};
pub use logging::logging_middleware;
pub use routes::build_router;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client supplied an amount that could not be parsed as a decimal
    /// number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The client supplied an amount that was zero or negative.
    ///
    /// Expenses record money that was spent, so every amount must be
    /// strictly positive.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    /// An empty string was used where a category name was required.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The requested expense or budget limit could not be found.
    ///
    /// For HTTP request handlers, the client should check that the id is
    /// correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Writing the CSV export failed.
    #[error("could not write the CSV export: {0}")]
    ExportError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON payload returned for every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A human-readable description of what went wrong.
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            Error::InvalidAmount(_) | Error::NonPositiveAmount | Error::EmptyCategoryName => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Internal errors are logged on the server and are not intended
            // to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred, check the server logs for more details".to_string(),
                )
            }
        };

        (status_code, Json(ErrorBody { error: message })).into_response()
    }
}
