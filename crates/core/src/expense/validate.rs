//! Structured validation of new expense requests.
//!
//! Validation collects every violation instead of stopping at the first, and
//! keys each one by field so callers can decide which to surface. Nothing is
//! persisted until validation passes in full.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use super::types::ExpenseCategory;

/// A single validation violation, keyed by the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Request field the violation applies to.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Validation errors for an expense request.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    /// All violations found, in field order.
    pub violations: Vec<Violation>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(Violation {
            field,
            message: message.into(),
        });
    }

    /// Returns true if no violations were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the first violation's message, the one handlers surface.
    #[must_use]
    pub fn first_message(&self) -> &str {
        self.violations
            .first()
            .map_or("Validation failed", |v| v.message.as_str())
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for v in &self.violations {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A fully validated new expense, ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Expense title.
    pub title: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Category from the closed set.
    pub category: ExpenseCategory,
    /// Expense date, defaulted to today when omitted.
    pub date: NaiveDate,
}

/// Validates the raw fields of a create-expense request.
///
/// # Errors
///
/// Returns every violation found; no field is applied partially.
pub fn validate_new_expense(
    title: Option<&str>,
    amount: Option<Decimal>,
    category: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<NewExpense, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        errors.push("title", "Title is required");
    }

    match amount {
        None => errors.push("amount", "Amount is required"),
        Some(a) if a <= Decimal::ZERO => {
            errors.push("amount", "Amount must be a positive number");
        }
        Some(_) => {}
    }

    let category = match category.map(str::trim) {
        None | Some("") => {
            errors.push("category", "Category is required");
            None
        }
        Some(raw) => {
            let parsed = ExpenseCategory::parse(raw);
            if parsed.is_none() {
                errors.push(
                    "category",
                    format!(
                        "Category must be one of: {}",
                        ExpenseCategory::ALL.map(|c| c.as_str()).join(", ")
                    ),
                );
            }
            parsed
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All violations checked above; unwraps here cannot fire.
    Ok(NewExpense {
        title: title.to_string(),
        amount: amount.unwrap_or(Decimal::ZERO),
        category: category.unwrap_or(ExpenseCategory::Other),
        date: date.unwrap_or_else(|| Utc::now().date_naive()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_input() -> (Option<&'static str>, Option<Decimal>, Option<&'static str>) {
        (Some("Taxi"), Some(dec!(500)), Some("Travel"))
    }

    #[test]
    fn test_valid_request() {
        let (title, amount, category) = valid_input();
        let date = NaiveDate::from_ymd_opt(2026, 3, 1);
        let expense = validate_new_expense(title, amount, category, date).unwrap();

        assert_eq!(expense.title, "Taxi");
        assert_eq!(expense.amount, dec!(500));
        assert_eq!(expense.category, ExpenseCategory::Travel);
        assert_eq!(expense.date, date.unwrap());
    }

    #[test]
    fn test_date_defaults_to_today() {
        let (title, amount, category) = valid_input();
        let expense = validate_new_expense(title, amount, category, None).unwrap();
        assert_eq!(expense.date, Utc::now().date_naive());
    }

    #[test]
    fn test_missing_title() {
        let err = validate_new_expense(None, Some(dec!(10)), Some("Food"), None).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "title");
        assert_eq!(err.first_message(), "Title is required");
    }

    #[test]
    fn test_whitespace_title_rejected() {
        let err = validate_new_expense(Some("   "), Some(dec!(10)), Some("Food"), None).unwrap_err();
        assert_eq!(err.violations[0].field, "title");
    }

    #[test]
    fn test_zero_and_negative_amount_rejected() {
        for amount in [dec!(0), dec!(-12.50)] {
            let err = validate_new_expense(Some("Taxi"), Some(amount), Some("Travel"), None)
                .unwrap_err();
            assert_eq!(err.violations[0].field, "amount");
            assert_eq!(err.first_message(), "Amount must be a positive number");
        }
    }

    #[test]
    fn test_unknown_category() {
        let err =
            validate_new_expense(Some("Taxi"), Some(dec!(10)), Some("Bribes"), None).unwrap_err();
        assert_eq!(err.violations[0].field, "category");
        assert!(err.first_message().contains("Travel"));
    }

    #[test]
    fn test_violations_accumulate_field_keyed() {
        let err = validate_new_expense(None, None, None, None).unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["title", "amount", "category"]);
    }

    #[test]
    fn test_title_is_trimmed() {
        let expense =
            validate_new_expense(Some("  Team lunch "), Some(dec!(80)), Some("Food"), None)
                .unwrap();
        assert_eq!(expense.title, "Team lunch");
    }
}
