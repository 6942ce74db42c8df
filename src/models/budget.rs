//! This file defines the `BudgetLimit` type, a spending cap for a category.

use serde::{Deserialize, Serialize};

use crate::models::{Amount, CategoryName};

/// A spending limit for a single category.
///
/// At most one limit exists per category; setting a limit for a category
/// that already has one replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    /// The category the limit applies to.
    pub category: CategoryName,
    /// The most that should be spent in the category.
    pub limit: Amount,
}
