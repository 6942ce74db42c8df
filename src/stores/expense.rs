//! Defines the expense store trait.

use time::Date;

use crate::{
    Error,
    models::{CategoryName, Expense, ExpenseBuilder, ExpenseId, ExpenseUpdate},
};

/// Handles the creation, retrieval, and mutation of expense records.
///
/// Validation of amounts and categories happens before a record reaches the
/// store: an [ExpenseBuilder] can only be constructed from already validated
/// domain types, so implementers never see invalid input.
pub trait ExpenseStore {
    /// Create a new expense in the store.
    ///
    /// Assigns a fresh unique id and returns the stored record.
    fn create(&mut self, builder: ExpenseBuilder) -> Result<Expense, Error>;

    /// Replace the fields of an existing expense that are present in
    /// `update`, leaving the rest unchanged.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored expense;
    /// the store is left unchanged in that case.
    fn update(&mut self, id: ExpenseId, update: ExpenseUpdate) -> Result<Expense, Error>;

    /// Remove an expense from the store.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored expense.
    fn delete(&mut self, id: ExpenseId) -> Result<(), Error>;

    /// Retrieve a single expense from the store.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored expense.
    fn get(&self, id: ExpenseId) -> Result<Expense, Error>;

    /// Retrieve the expenses matching `query`, in insertion order.
    fn get_query(&self, query: ExpenseQuery) -> Result<Vec<Expense>, Error>;

    /// The total number of expenses in the store.
    fn count(&self) -> Result<usize, Error>;
}

/// Defines which expenses should be fetched from [ExpenseStore::get_query].
///
/// Both date bounds are inclusive and independently optional. The default
/// query matches every record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseQuery {
    /// Include expenses on or after this date.
    pub start_date: Option<Date>,
    /// Include expenses on or before this date.
    pub end_date: Option<Date>,
    /// Include only expenses in this category.
    pub category: Option<CategoryName>,
}

impl ExpenseQuery {
    /// Whether `expense` passes this filter.
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(start_date) = self.start_date
            && expense.date() < start_date
        {
            return false;
        }

        if let Some(end_date) = self.end_date
            && expense.date() > end_date
        {
            return false;
        }

        if let Some(category) = &self.category
            && expense.category() != category
        {
            return false;
        }

        true
    }
}
