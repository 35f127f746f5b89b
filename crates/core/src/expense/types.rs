//! Expense status and category enumerations.
//!
//! Both sets are closed: the wire format, the database enums, and these types
//! must agree. Variant names double as the wire strings (`Pending`, `Travel`),
//! matching what the frontend sends and displays.

use serde::{Deserialize, Serialize};

/// Expense request status.
///
/// A new request starts `Pending`. A manager or admin moves it to `Approved`
/// or `Rejected`; both are terminal as far as the workflow is concerned,
/// though no guard prevents a reviewer from rewriting a terminal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseStatus {
    /// Awaiting a reviewer's decision.
    Pending,
    /// Accepted by a reviewer.
    Approved,
    /// Declined by a reviewer, with a recorded reason.
    Rejected,
}

impl ExpenseStatus {
    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Returns true if no further transition is defined from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Travel and transportation.
    Travel,
    /// Meals and catering.
    Food,
    /// Software licenses and subscriptions.
    Software,
    /// Hardware and office equipment.
    Equipment,
    /// Marketing and advertising spend.
    Marketing,
    /// Anything that fits nowhere else.
    Other,
}

impl ExpenseCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 6] = [
        Self::Travel,
        Self::Food,
        Self::Software,
        Self::Equipment,
        Self::Marketing,
        Self::Other,
    ];

    /// Parses a category from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "travel" => Some(Self::Travel),
            "food" => Some(Self::Food),
            "software" => Some(Self::Software),
            "equipment" => Some(Self::Equipment),
            "marketing" => Some(Self::Marketing),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Travel => "Travel",
            Self::Food => "Food",
            Self::Software => "Software",
            Self::Equipment => "Equipment",
            Self::Marketing => "Marketing",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(ExpenseStatus::parse("Pending"), Some(ExpenseStatus::Pending));
        assert_eq!(
            ExpenseStatus::parse("approved"),
            Some(ExpenseStatus::Approved)
        );
        assert_eq!(
            ExpenseStatus::parse("REJECTED"),
            Some(ExpenseStatus::Rejected)
        );
        assert_eq!(ExpenseStatus::parse("archived"), None);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!ExpenseStatus::Pending.is_terminal());
        assert!(ExpenseStatus::Approved.is_terminal());
        assert!(ExpenseStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ExpenseStatus::Pending.to_string(), "Pending");
        assert_eq!(ExpenseStatus::Rejected.to_string(), "Rejected");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            ExpenseCategory::parse("Travel"),
            Some(ExpenseCategory::Travel)
        );
        assert_eq!(ExpenseCategory::parse("food"), Some(ExpenseCategory::Food));
        assert_eq!(
            ExpenseCategory::parse("MARKETING"),
            Some(ExpenseCategory::Marketing)
        );
        assert_eq!(ExpenseCategory::parse("Travelling"), None);
        assert_eq!(ExpenseCategory::parse(""), None);
    }

    #[test]
    fn test_category_all_roundtrips() {
        for category in ExpenseCategory::ALL {
            assert_eq!(ExpenseCategory::parse(category.as_str()), Some(category));
        }
    }
}
