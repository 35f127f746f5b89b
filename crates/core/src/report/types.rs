//! Report row types.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::expense::{ExpenseCategory, ExpenseStatus};

/// Requester identity joined into a report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    /// Username of the requester.
    pub username: String,
    /// Requester's department.
    pub department: String,
}

/// One expense row of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Expense title.
    pub title: String,
    /// Category.
    pub category: ExpenseCategory,
    /// Amount.
    pub amount: Decimal,
    /// Workflow status.
    pub status: ExpenseStatus,
    /// Requester identity, when the join produced one.
    pub requester: Option<Requester>,
    /// Expense date.
    pub date: Option<NaiveDate>,
}

/// Formats an amount with two decimal places for display.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}
