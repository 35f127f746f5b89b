//! `SeaORM` active enums mapping the Postgres enum types.
//!
//! Conversions to and from the `corpspend-core` domain enums live here so the
//! closed sets cannot drift apart without a compile error.

use corpspend_core::expense::{ExpenseCategory as CoreCategory, ExpenseStatus as CoreStatus};
use corpspend_core::policy::Role;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role enum (`user_role`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    /// Submits expenses, sees own records only.
    #[sea_orm(string_value = "employee")]
    Employee,
    /// Reviews expenses, sees all records.
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Reviews expenses, sees all records.
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Expense status enum (`expense_status`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_status")]
pub enum ExpenseStatus {
    /// Awaiting review.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Accepted by a reviewer.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined by a reviewer.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Expense category enum (`expense_category`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_category")]
pub enum ExpenseCategory {
    /// Travel and transportation.
    #[sea_orm(string_value = "travel")]
    Travel,
    /// Meals and catering.
    #[sea_orm(string_value = "food")]
    Food,
    /// Software licenses and subscriptions.
    #[sea_orm(string_value = "software")]
    Software,
    /// Hardware and office equipment.
    #[sea_orm(string_value = "equipment")]
    Equipment,
    /// Marketing and advertising spend.
    #[sea_orm(string_value = "marketing")]
    Marketing,
    /// Everything else.
    #[sea_orm(string_value = "other")]
    Other,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Employee => Self::Employee,
            Role::Manager => Self::Manager,
            Role::Admin => Self::Admin,
        }
    }
}

impl From<&UserRole> for Role {
    fn from(role: &UserRole) -> Self {
        match role {
            UserRole::Employee => Self::Employee,
            UserRole::Manager => Self::Manager,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<CoreStatus> for ExpenseStatus {
    fn from(status: CoreStatus) -> Self {
        match status {
            CoreStatus::Pending => Self::Pending,
            CoreStatus::Approved => Self::Approved,
            CoreStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<&ExpenseStatus> for CoreStatus {
    fn from(status: &ExpenseStatus) -> Self {
        match status {
            ExpenseStatus::Pending => Self::Pending,
            ExpenseStatus::Approved => Self::Approved,
            ExpenseStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<CoreCategory> for ExpenseCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Travel => Self::Travel,
            CoreCategory::Food => Self::Food,
            CoreCategory::Software => Self::Software,
            CoreCategory::Equipment => Self::Equipment,
            CoreCategory::Marketing => Self::Marketing,
            CoreCategory::Other => Self::Other,
        }
    }
}

impl From<&ExpenseCategory> for CoreCategory {
    fn from(category: &ExpenseCategory) -> Self {
        match category {
            ExpenseCategory::Travel => Self::Travel,
            ExpenseCategory::Food => Self::Food,
            ExpenseCategory::Software => Self::Software,
            ExpenseCategory::Equipment => Self::Equipment,
            ExpenseCategory::Marketing => Self::Marketing,
            ExpenseCategory::Other => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_conversions_roundtrip() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            let db: UserRole = role.into();
            assert_eq!(Role::from(&db), role);
        }
    }

    #[test]
    fn test_status_conversions_roundtrip() {
        for status in [
            CoreStatus::Pending,
            CoreStatus::Approved,
            CoreStatus::Rejected,
        ] {
            let db: ExpenseStatus = status.into();
            assert_eq!(CoreStatus::from(&db), status);
        }
    }

    #[test]
    fn test_category_conversions_roundtrip() {
        for category in CoreCategory::ALL {
            let db: ExpenseCategory = category.into();
            assert_eq!(CoreCategory::from(&db), category);
        }
    }
}
