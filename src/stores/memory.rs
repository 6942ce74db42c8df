//! In-memory implementations of the store traits.
//!
//! These stores keep their records in process memory and share them across
//! clones, so every request handler sees the same data. Records are lost
//! when the process exits; use the [sqlite](crate::stores::sqlite) stores to
//! persist them.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use crate::{
    AppState, Error,
    models::{Amount, BudgetLimit, CategoryName, Expense, ExpenseBuilder, ExpenseId, ExpenseUpdate},
    stores::{BudgetStore, ExpenseQuery, ExpenseStore},
};

/// Stores expenses in an in-memory list, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExpenseStore {
    expenses: Arc<Mutex<Vec<Expense>>>,
}

impl InMemoryExpenseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn create(&mut self, builder: ExpenseBuilder) -> Result<Expense, Error> {
        let expense = builder.finalise(ExpenseId::generate());

        self.expenses.lock().unwrap().push(expense.clone());

        Ok(expense)
    }

    fn update(&mut self, id: ExpenseId, update: ExpenseUpdate) -> Result<Expense, Error> {
        let mut expenses = self.expenses.lock().unwrap();

        let expense = expenses
            .iter_mut()
            .find(|expense| expense.id() == id)
            .ok_or(Error::NotFound)?;

        update.apply(expense);

        Ok(expense.clone())
    }

    fn delete(&mut self, id: ExpenseId) -> Result<(), Error> {
        let mut expenses = self.expenses.lock().unwrap();

        let index = expenses
            .iter()
            .position(|expense| expense.id() == id)
            .ok_or(Error::NotFound)?;

        expenses.remove(index);

        Ok(())
    }

    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        self.expenses
            .lock()
            .unwrap()
            .iter()
            .find(|expense| expense.id() == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_query(&self, query: ExpenseQuery) -> Result<Vec<Expense>, Error> {
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|expense| query.matches(expense))
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize, Error> {
        Ok(self.expenses.lock().unwrap().len())
    }
}

/// Stores budget limits in an in-memory map keyed by category.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBudgetStore {
    limits: Arc<Mutex<BTreeMap<CategoryName, Amount>>>,
}

impl InMemoryBudgetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BudgetStore for InMemoryBudgetStore {
    fn set_limit(&mut self, limit: BudgetLimit) -> Result<(), Error> {
        self.limits
            .lock()
            .unwrap()
            .insert(limit.category, limit.limit);

        Ok(())
    }

    fn get_limit(&self, category: &CategoryName) -> Result<Option<BudgetLimit>, Error> {
        Ok(self
            .limits
            .lock()
            .unwrap()
            .get(category)
            .map(|&limit| BudgetLimit {
                category: category.clone(),
                limit,
            }))
    }

    fn get_all(&self) -> Result<Vec<BudgetLimit>, Error> {
        Ok(self
            .limits
            .lock()
            .unwrap()
            .iter()
            .map(|(category, &limit)| BudgetLimit {
                category: category.clone(),
                limit,
            })
            .collect())
    }
}

/// An alias for an [AppState] backed by the in-memory stores.
pub type MemoryAppState = AppState<InMemoryExpenseStore, InMemoryBudgetStore>;

/// Creates an [AppState] that keeps all records in process memory.
pub fn create_app_state() -> MemoryAppState {
    AppState::new(InMemoryExpenseStore::new(), InMemoryBudgetStore::new())
}

#[cfg(test)]
mod in_memory_expense_store_tests {
    use time::{Date, Month};

    use crate::{
        Error,
        models::{CategoryName, Expense, ExpenseUpdate},
        stores::{ExpenseQuery, ExpenseStore},
    };

    use super::InMemoryExpenseStore;

    fn build_expense(amount: &str, category: &str, day: u8) -> crate::models::ExpenseBuilder {
        Expense::build(
            amount.parse().unwrap(),
            CategoryName::new_unchecked(category),
        )
        .date(Date::from_calendar_date(2025, Month::April, day).unwrap())
    }

    #[test]
    fn create_then_list_contains_the_record() {
        let mut store = InMemoryExpenseStore::new();

        let created = store
            .create(build_expense("45.99", "Groceries", 2).description("Weekly shop"))
            .unwrap();

        let expenses = store.get_query(ExpenseQuery::default()).unwrap();
        assert_eq!(expenses, vec![created.clone()]);
        assert_eq!(created.amount(), "45.99".parse().unwrap());
        assert_eq!(created.description(), "Weekly shop");
    }

    #[test]
    fn create_assigns_distinct_ids() {
        let mut store = InMemoryExpenseStore::new();

        let first = store.create(build_expense("1.00", "Groceries", 1)).unwrap();
        let second = store.create(build_expense("2.00", "Groceries", 1)).unwrap();

        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn get_returns_the_stored_record() {
        let mut store = InMemoryExpenseStore::new();
        let created = store.create(build_expense("1.00", "Dining", 1)).unwrap();

        assert_eq!(store.get(created.id()), Ok(created));
    }

    #[test]
    fn get_fails_on_unknown_id() {
        let store = InMemoryExpenseStore::new();

        assert_eq!(
            store.get(crate::models::ExpenseId::generate()),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn update_replaces_only_supplied_fields() {
        let mut store = InMemoryExpenseStore::new();
        let created = store
            .create(build_expense("45.99", "Groceries", 2).description("Weekly shop"))
            .unwrap();

        let updated = store
            .update(
                created.id(),
                ExpenseUpdate {
                    amount: Some("12.50".parse().unwrap()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount(), "12.50".parse().unwrap());
        assert_eq!(updated.category(), created.category());
        assert_eq!(updated.date(), created.date());
        assert_eq!(updated.description(), created.description());
        assert_eq!(store.get(created.id()), Ok(updated));
    }

    #[test]
    fn update_fails_on_unknown_id_and_leaves_store_unchanged() {
        let mut store = InMemoryExpenseStore::new();
        store.create(build_expense("1.00", "Dining", 1)).unwrap();

        let result = store.update(
            crate::models::ExpenseId::generate(),
            ExpenseUpdate::default(),
        );

        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(store.count(), Ok(1));
    }

    #[test]
    fn delete_removes_exactly_that_record() {
        let mut store = InMemoryExpenseStore::new();
        let keep = store.create(build_expense("1.00", "Dining", 1)).unwrap();
        let remove = store.create(build_expense("2.00", "Dining", 1)).unwrap();

        store.delete(remove.id()).unwrap();

        assert_eq!(store.get_query(ExpenseQuery::default()), Ok(vec![keep]));
    }

    #[test]
    fn delete_fails_on_unknown_id() {
        let mut store = InMemoryExpenseStore::new();

        assert_eq!(
            store.delete(crate::models::ExpenseId::generate()),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn get_query_filters_by_inclusive_date_range() {
        let mut store = InMemoryExpenseStore::new();
        let too_early = store.create(build_expense("1.00", "Dining", 1)).unwrap();
        let on_start = store.create(build_expense("2.00", "Dining", 2)).unwrap();
        let on_end = store.create(build_expense("3.00", "Dining", 3)).unwrap();
        let too_late = store.create(build_expense("4.00", "Dining", 4)).unwrap();

        let got = store
            .get_query(ExpenseQuery {
                start_date: Some(Date::from_calendar_date(2025, Month::April, 2).unwrap()),
                end_date: Some(Date::from_calendar_date(2025, Month::April, 3).unwrap()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(got, vec![on_start, on_end]);
        assert!(!got.contains(&too_early));
        assert!(!got.contains(&too_late));
    }

    #[test]
    fn get_query_filters_by_category() {
        let mut store = InMemoryExpenseStore::new();
        let groceries = store
            .create(build_expense("1.00", "Groceries", 1))
            .unwrap();
        store.create(build_expense("2.00", "Dining", 1)).unwrap();

        let got = store
            .get_query(ExpenseQuery {
                category: Some(CategoryName::new_unchecked("Groceries")),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(got, vec![groceries]);
    }

    #[test]
    fn get_query_preserves_insertion_order() {
        let mut store = InMemoryExpenseStore::new();
        // Deliberately out of date order.
        let later = store.create(build_expense("1.00", "Dining", 20)).unwrap();
        let earlier = store.create(build_expense("2.00", "Dining", 10)).unwrap();

        let got = store.get_query(ExpenseQuery::default()).unwrap();

        assert_eq!(got, vec![later, earlier]);
    }

    #[test]
    fn clones_share_records() {
        let mut store = InMemoryExpenseStore::new();
        let mut clone = store.clone();

        store.create(build_expense("1.00", "Dining", 1)).unwrap();
        clone.create(build_expense("2.00", "Dining", 1)).unwrap();

        assert_eq!(store.count(), Ok(2));
    }
}
