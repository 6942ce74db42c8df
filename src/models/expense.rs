//! This file defines the `Expense` type, the core record of the application.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::models::{Amount, CategoryName};

/// The unique identifier of an [Expense].
///
/// Ids are random UUIDs assigned when a record is created and never change
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Generate a fresh, random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(text).map(Self)
    }
}

/// A single dated monetary record with a category and optional description.
///
/// To create a new `Expense`, use [Expense::build]. Existing expenses are
/// retrieved through an [ExpenseStore](crate::stores::ExpenseStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    amount: Amount,
    category: CategoryName,
    date: Date,
    description: String,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder::new] for discoverability.
    pub fn build(amount: Amount, category: CategoryName) -> ExpenseBuilder {
        ExpenseBuilder::new(amount, category)
    }

    /// Create an expense from parts that have already been validated.
    ///
    /// This is intended for store implementations reconstructing records
    /// they wrote earlier.
    pub fn new_unchecked(
        id: ExpenseId,
        amount: Amount,
        category: CategoryName,
        date: Date,
        description: String,
    ) -> Self {
        Self {
            id,
            amount,
            category,
            date,
            description,
        }
    }

    /// The id of the expense.
    pub fn id(&self) -> ExpenseId {
        self.id
    }

    /// The amount of money spent.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The category the expense belongs to.
    pub fn category(&self) -> &CategoryName {
        &self.category
    }

    /// The day the expense occurred.
    pub fn date(&self) -> Date {
        self.date
    }

    /// A text description of what the expense was for.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for creating a new [Expense].
///
/// The date defaults to the current day and the description to an empty
/// string. The builder is finalized by an
/// [ExpenseStore](crate::stores::ExpenseStore), which assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBuilder {
    amount: Amount,
    category: CategoryName,
    date: Date,
    description: String,
}

impl ExpenseBuilder {
    /// Create a builder for a new expense.
    pub fn new(amount: Amount, category: CategoryName) -> Self {
        Self {
            amount,
            category,
            date: OffsetDateTime::now_utc().date(),
            description: String::new(),
        }
    }

    /// Set the date of the expense.
    pub fn date(mut self, date: Date) -> Self {
        self.date = date;
        self
    }

    /// Set the description of the expense.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Convert the builder into an [Expense] with the given `id`.
    pub fn finalise(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            date: self.date,
            description: self.description,
        }
    }
}

/// A partial set of fields to apply to an existing [Expense].
///
/// Fields set to `None` are left unchanged; the id can never change.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseUpdate {
    /// The new amount, if it should change.
    pub amount: Option<Amount>,
    /// The new category, if it should change.
    pub category: Option<CategoryName>,
    /// The new date, if it should change.
    pub date: Option<Date>,
    /// The new description, if it should change.
    pub description: Option<String>,
}

impl ExpenseUpdate {
    /// Overwrite the fields of `expense` that are present in this update.
    pub fn apply(self, expense: &mut Expense) {
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }

        if let Some(category) = self.category {
            expense.category = category;
        }

        if let Some(date) = self.date {
            expense.date = date;
        }

        if let Some(description) = self.description {
            expense.description = description;
        }
    }
}

#[cfg(test)]
mod expense_tests {
    use time::{Date, Month, OffsetDateTime};

    use crate::models::{Amount, CategoryName};

    use super::{Expense, ExpenseId, ExpenseUpdate};

    fn groceries_amount() -> Amount {
        "45.99".parse().unwrap()
    }

    #[test]
    fn builder_defaults_to_today_and_empty_description() {
        let expense = Expense::build(groceries_amount(), CategoryName::new_unchecked("Groceries"))
            .finalise(ExpenseId::generate());

        assert_eq!(expense.date(), OffsetDateTime::now_utc().date());
        assert_eq!(expense.description(), "");
    }

    #[test]
    fn builder_keeps_explicit_fields() {
        let date = Date::from_calendar_date(2025, Month::April, 2).unwrap();

        let expense = Expense::build(groceries_amount(), CategoryName::new_unchecked("Groceries"))
            .date(date)
            .description("Weekly shop")
            .finalise(ExpenseId::generate());

        assert_eq!(expense.amount(), groceries_amount());
        assert_eq!(expense.category().as_ref(), "Groceries");
        assert_eq!(expense.date(), date);
        assert_eq!(expense.description(), "Weekly shop");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ExpenseId::generate(), ExpenseId::generate());
    }

    #[test]
    fn update_replaces_only_supplied_fields() {
        let date = Date::from_calendar_date(2025, Month::April, 2).unwrap();
        let mut expense =
            Expense::build(groceries_amount(), CategoryName::new_unchecked("Groceries"))
                .date(date)
                .description("Weekly shop")
                .finalise(ExpenseId::generate());
        let original_id = expense.id();

        ExpenseUpdate {
            amount: Some("12.50".parse().unwrap()),
            ..Default::default()
        }
        .apply(&mut expense);

        assert_eq!(expense.id(), original_id);
        assert_eq!(expense.amount(), "12.50".parse().unwrap());
        assert_eq!(expense.category().as_ref(), "Groceries");
        assert_eq!(expense.date(), date);
        assert_eq!(expense.description(), "Weekly shop");
    }

    #[test]
    fn round_trips_through_json_with_exact_amount() {
        let expense = Expense::build(groceries_amount(), CategoryName::new_unchecked("Groceries"))
            .date(Date::from_calendar_date(2025, Month::April, 2).unwrap())
            .description("Weekly shop")
            .finalise(ExpenseId::generate());

        let json = serde_json::to_string(&expense).unwrap();
        let got: Expense = serde_json::from_str(&json).unwrap();

        assert_eq!(got, expense);
    }

    #[test]
    fn dates_serialize_as_calendar_dates() {
        let expense = Expense::build(groceries_amount(), CategoryName::new_unchecked("Groceries"))
            .date(Date::from_calendar_date(2025, Month::April, 2).unwrap())
            .finalise(ExpenseId::generate());

        let json = serde_json::to_string(&expense).unwrap();

        assert!(
            json.contains("\"2025-04-02\""),
            "want date serialized as \"2025-04-02\", got {json}"
        );
    }
}
