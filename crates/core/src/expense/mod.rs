//! Expense domain types and request validation.
//!
//! # Modules
//!
//! - `types` - Status and category enumerations
//! - `validate` - Structured validation of new expense requests

pub mod types;
pub mod validate;

pub use types::{ExpenseCategory, ExpenseStatus};
pub use validate::{NewExpense, ValidationErrors, Violation, validate_new_expense};
