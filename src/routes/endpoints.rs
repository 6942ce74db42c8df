//! The API endpoints URIs.

/// The route to create and list expenses.
pub const EXPENSES: &str = "/expenses";
/// The route to update or delete a single expense.
pub const EXPENSE: &str = "/expenses/{expense_id}";
/// The route for the sum of expense amounts.
pub const BALANCE: &str = "/balance";
/// The route for per-category expense totals.
pub const SUMMARY: &str = "/summary";
/// The route to set and list budget limits.
pub const BUDGETS: &str = "/budgets";
/// The route to check spending against a category's budget limit.
pub const BUDGET_STATUS: &str = "/budgets/{category}/status";
/// The route to download all expenses as CSV.
pub const EXPORT: &str = "/export";
