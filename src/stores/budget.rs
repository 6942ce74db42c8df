//! Defines the budget limit store trait.

use crate::{
    Error,
    models::{BudgetLimit, CategoryName},
};

/// Handles per-category budget limits.
pub trait BudgetStore {
    /// Set the limit for a category, replacing any existing limit.
    fn set_limit(&mut self, limit: BudgetLimit) -> Result<(), Error>;

    /// Retrieve the limit for a category, or `None` when no limit is set.
    fn get_limit(&self, category: &CategoryName) -> Result<Option<BudgetLimit>, Error>;

    /// Retrieve all configured limits, ordered by category name.
    fn get_all(&self) -> Result<Vec<BudgetLimit>, Error>;
}
