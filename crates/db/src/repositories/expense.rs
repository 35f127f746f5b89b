//! Expense repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{
    expenses,
    sea_orm_active_enums::{ExpenseCategory, ExpenseStatus},
    users,
};

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("Expense not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Expense title.
    pub title: String,
    /// Positive amount; the check constraint backs the validation layer up.
    pub amount: Decimal,
    /// Category.
    pub category: ExpenseCategory,
    /// Expense date.
    pub expense_date: NaiveDate,
    /// The requesting user.
    pub requested_by: Uuid,
}

/// An expense with its requester joined in, when the join matched.
pub type ExpenseWithRequester = (expenses::Model, Option<users::Model>);

/// Expense repository for CRUD and workflow operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new expense in pending state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateExpenseInput) -> Result<expenses::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            amount: Set(input.amount),
            category: Set(input.category),
            expense_date: Set(input.expense_date),
            requested_by: Set(input.requested_by),
            status: Set(ExpenseStatus::Pending),
            rejection_reason: Set(String::new()),
            action_taken_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        expense.insert(&self.db).await
    }

    /// Finds an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<expenses::Model>, DbErr> {
        expenses::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds an expense by ID with its requester joined in.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id_with_requester(
        &self,
        id: Uuid,
    ) -> Result<Option<ExpenseWithRequester>, DbErr> {
        expenses::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
    }

    /// Lists every expense with requester identity, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all_with_requester(&self) -> Result<Vec<ExpenseWithRequester>, DbErr> {
        expenses::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists one user's expenses with requester identity, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_requester_with_requester(
        &self,
        requester: Uuid,
    ) -> Result<Vec<ExpenseWithRequester>, DbErr> {
        expenses::Entity::find()
            .filter(expenses::Column::RequestedBy.eq(requester))
            .find_also_related(users::Entity)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Applies a reviewer's decision to an expense.
    ///
    /// Sets the status, records the acting reviewer, and stores the rejection
    /// reason when one is supplied. The previous status is returned alongside
    /// the updated record so callers can observe terminal-status overwrites.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` if the id is unknown.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ExpenseStatus,
        rejection_reason: Option<String>,
        action_by: Uuid,
    ) -> Result<(expenses::Model, ExpenseStatus), ExpenseError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(ExpenseError::NotFound(id))?;
        let previous_status = existing.status.clone();

        let mut expense: expenses::ActiveModel = existing.into();
        expense.status = Set(status);
        expense.action_taken_by = Set(Some(action_by));
        if let Some(reason) = rejection_reason {
            expense.rejection_reason = Set(reason);
        }
        expense.updated_at = Set(chrono::Utc::now().into());

        let updated = expense.update(&self.db).await?;
        Ok((updated, previous_status))
    }
}
