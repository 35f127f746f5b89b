//! Roles, capabilities, and visibility scoping.
//!
//! The authorization model is deliberately small: a closed role set, a
//! visibility scope derived from the role, and a single gated capability
//! (reviewing expenses). Every check is an exhaustive match so adding a role
//! forces each capability to be reconsidered.

use serde::{Deserialize, Serialize};

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits expenses; sees only their own records.
    Employee,
    /// Reviews expenses; sees all records.
    Manager,
    /// Reviews expenses; sees all records.
    Admin,
}

/// The set of expense records a role is permitted to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only records the user requested themselves.
    Own,
    /// Every record, regardless of requester.
    All,
}

impl Role {
    /// Parses a role from its wire string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "employee" => Some(Self::Employee),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Parses a role, falling back to employee for anything outside the
    /// closed set. Registration uses this so a crafted `role` field cannot
    /// grant elevated access.
    #[must_use]
    pub fn parse_or_employee(s: Option<&str>) -> Self {
        s.and_then(Self::parse).unwrap_or(Self::Employee)
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns the expense visibility scope for this role.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        match self {
            Self::Employee => Visibility::Own,
            Self::Manager | Self::Admin => Visibility::All,
        }
    }

    /// Returns true if this role can approve or reject expenses.
    #[must_use]
    pub const fn can_review(&self) -> bool {
        match self {
            Self::Employee => false,
            Self::Manager | Self::Admin => true,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("employee"), Some(Role::Employee));
        assert_eq!(Role::parse("MANAGER"), Some(Role::Manager));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_unknown_role_coerced_to_employee() {
        assert_eq!(Role::parse_or_employee(None), Role::Employee);
        assert_eq!(Role::parse_or_employee(Some("owner")), Role::Employee);
        assert_eq!(Role::parse_or_employee(Some("manager")), Role::Manager);
    }

    #[test]
    fn test_visibility_scope() {
        assert_eq!(Role::Employee.visibility(), Visibility::Own);
        assert_eq!(Role::Manager.visibility(), Visibility::All);
        assert_eq!(Role::Admin.visibility(), Visibility::All);
    }

    #[test]
    fn test_review_capability() {
        assert!(!Role::Employee.can_review());
        assert!(Role::Manager.can_review());
        assert!(Role::Admin.can_review());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Employee.to_string(), "employee");
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
