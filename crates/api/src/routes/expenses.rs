//! Expense routes: listing, creation, review, and report export.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_response};
use corpspend_core::expense::{ExpenseStatus, validate_new_expense};
use corpspend_core::policy::Visibility;
use corpspend_core::report::{
    ReportEntry, Requester, attachment_filename, render_csv, render_html_report,
};
use corpspend_db::repositories::{
    CreateExpenseInput, ExpenseError, ExpenseRepository, ExpenseWithRequester,
};
use corpspend_db::{UserRepository, entities::expenses, entities::users};
use corpspend_shared::email::{DeliveryOutcome, is_valid_address};
use corpspend_shared::AppError;

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(get_expenses).post(create_expense))
        .route("/expenses/approve/{id}", put(update_status))
        .route("/expenses/send-report", post(send_report))
        .route("/expenses/export/csv", get(export_csv))
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Body for creating an expense. Fields are optional so validation can
/// report missing ones instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Expense title.
    pub title: Option<String>,
    /// Amount; accepts a JSON number or numeric string.
    pub amount: Option<Decimal>,
    /// Category name.
    pub category: Option<String>,
    /// Expense date (`YYYY-MM-DD`), defaults to today.
    pub date: Option<NaiveDate>,
}

/// Body for the approve/reject endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Target status: `Approved` or `Rejected`.
    pub status: Option<String>,
    /// Reason, stored when rejecting.
    pub rejection_reason: Option<String>,
}

/// Body for the send-report endpoint.
#[derive(Debug, Deserialize)]
pub struct SendReportRequest {
    /// Recipient address.
    pub email: Option<String>,
}

/// Requester identity embedded in expense responses.
#[derive(Debug, Serialize)]
pub struct RequesterResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Department.
    pub department: String,
}

/// An expense on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Amount, two decimal places.
    pub amount: String,
    /// Category.
    pub category: String,
    /// Expense date.
    pub date: NaiveDate,
    /// Workflow status.
    pub status: String,
    /// Rejection reason; empty unless rejected.
    pub rejection_reason: String,
    /// Requester identity, when the join matched.
    pub requested_by: Option<RequesterResponse>,
    /// Reviewer who acted on the request.
    pub action_taken_by: Option<Uuid>,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Formats a Decimal as a string with 2 decimal places.
fn format_money(amount: Decimal) -> String {
    format!("{amount:.2}")
}

/// Parses a review target status; only the two reviewer decisions are valid.
fn parse_review_status(s: &str) -> Option<ExpenseStatus> {
    match ExpenseStatus::parse(s) {
        Some(status @ (ExpenseStatus::Approved | ExpenseStatus::Rejected)) => Some(status),
        _ => None,
    }
}

/// Converts a joined row to the wire representation.
fn to_response(expense: expenses::Model, requester: Option<users::Model>) -> ExpenseResponse {
    ExpenseResponse {
        id: expense.id,
        title: expense.title,
        amount: format_money(expense.amount),
        category: corpspend_core::expense::ExpenseCategory::from(&expense.category)
            .as_str()
            .to_string(),
        date: expense.expense_date,
        status: ExpenseStatus::from(&expense.status).as_str().to_string(),
        rejection_reason: expense.rejection_reason,
        requested_by: requester.map(|u| RequesterResponse {
            id: u.id,
            username: u.username,
            email: u.email,
            department: u.department,
        }),
        action_taken_by: expense.action_taken_by,
    }
}

/// Converts a joined row to a report entry.
fn to_report_entry(row: &ExpenseWithRequester) -> ReportEntry {
    let (expense, requester) = row;
    ReportEntry {
        title: expense.title.clone(),
        category: corpspend_core::expense::ExpenseCategory::from(&expense.category),
        amount: expense.amount,
        status: ExpenseStatus::from(&expense.status),
        requester: requester.as_ref().map(|u| Requester {
            username: u.username.clone(),
            department: u.department.clone(),
        }),
        date: Some(expense.expense_date),
    }
}

/// Fetches the caller's visible expense set, requester joined in.
async fn visible_rows(
    state: &AppState,
    auth: &AuthUser,
) -> Result<Vec<ExpenseWithRequester>, sea_orm::DbErr> {
    let repo = ExpenseRepository::new((*state.db).clone());
    match auth.role().visibility() {
        Visibility::All => repo.list_all_with_requester().await,
        Visibility::Own => repo.list_for_requester_with_requester(auth.user_id()).await,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /expenses - List expenses in the caller's visibility scope.
async fn get_expenses(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let rows = match visible_rows(&state, &auth).await {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "Failed to list expenses");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let responses: Vec<ExpenseResponse> = rows
        .into_iter()
        .map(|(expense, requester)| to_response(expense, requester))
        .collect();

    (StatusCode::OK, Json(responses)).into_response()
}

/// POST /expenses - Create a new expense in pending state.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    let new_expense = match validate_new_expense(
        payload.title.as_deref(),
        payload.amount,
        payload.category.as_deref(),
        payload.date,
    ) {
        Ok(v) => v,
        Err(violations) => {
            return error_response(&AppError::Validation(violations.first_message().to_string()));
        }
    };

    let repo = ExpenseRepository::new((*state.db).clone());
    let expense = match repo
        .create(CreateExpenseInput {
            title: new_expense.title,
            amount: new_expense.amount,
            category: new_expense.category.into(),
            expense_date: new_expense.date,
            requested_by: auth.user_id(),
        })
        .await
    {
        Ok(e) => e,
        Err(e) => {
            error!(error = %e, "Failed to create expense");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let requester = match UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to load requester");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    info!(expense_id = %expense.id, user_id = %auth.user_id(), "Expense created");

    (StatusCode::CREATED, Json(to_response(expense, requester))).into_response()
}

/// PUT /expenses/approve/{id} - Approve or reject a pending expense.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthUser,
    Json(payload): Json<ReviewRequest>,
) -> impl IntoResponse {
    // Role gate comes first: no mutation runs for an employee.
    if !auth.role().can_review() {
        return error_response(&AppError::Forbidden("Access denied".to_string()));
    }

    let Some(status) = payload.status.as_deref().and_then(parse_review_status) else {
        return error_response(&AppError::Validation(
            "Status must be Approved or Rejected".to_string(),
        ));
    };

    let rejection_reason = match status {
        ExpenseStatus::Rejected => Some(payload.rejection_reason.unwrap_or_default()),
        ExpenseStatus::Pending | ExpenseStatus::Approved => None,
    };

    let repo = ExpenseRepository::new((*state.db).clone());
    let (updated, previous) = match repo
        .update_status(id, status.into(), rejection_reason, auth.user_id())
        .await
    {
        Ok(r) => r,
        Err(ExpenseError::NotFound(_)) => {
            return error_response(&AppError::NotFound("Expense not found".to_string()));
        }
        Err(ExpenseError::Database(e)) => {
            error!(error = %e, "Failed to update expense status");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    if ExpenseStatus::from(&previous).is_terminal() {
        warn!(
            expense_id = %id,
            previous = %ExpenseStatus::from(&previous),
            new = %status,
            "Reviewed expense was already in a terminal status"
        );
    }

    info!(
        expense_id = %id,
        status = %status,
        reviewer = %auth.user_id(),
        "Expense reviewed"
    );

    let requester = match UserRepository::new((*state.db).clone())
        .find_by_id(updated.requested_by)
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to load requester");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    (StatusCode::OK, Json(to_response(updated, requester))).into_response()
}

/// POST /expenses/send-report - Email an HTML summary of the visible set.
async fn send_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SendReportRequest>,
) -> impl IntoResponse {
    let Some(email) = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| is_valid_address(e))
    else {
        return error_response(&AppError::Validation(
            "Valid email address is required".to_string(),
        ));
    };

    let rows = match visible_rows(&state, &auth).await {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "Failed to list expenses for report");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let entries: Vec<ReportEntry> = rows.iter().map(to_report_entry).collect();
    let privileged = auth.role().visibility() == Visibility::All;
    let today = chrono::Utc::now().date_naive();

    let html = render_html_report(&entries, privileged, today);
    let subject = format!("CorpSpend Expense Report \u{2013} {}", today.format("%d %B %Y"));

    match state.email_service.send_html(email, &subject, &html).await {
        Ok(DeliveryOutcome::Sent) => {
            info!(recipient = %email, entries = entries.len(), "Expense report sent");
            (
                StatusCode::OK,
                Json(json!({ "msg": format!("Report sent to {email}") })),
            )
                .into_response()
        }
        Ok(DeliveryOutcome::Preview { path }) => (
            StatusCode::OK,
            Json(json!({
                "msg": "Demo mode: Email generated successfully!",
                "previewUrl": path
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, recipient = %email, "Failed to send expense report");
            error_response(&AppError::Email(e.to_string()))
        }
    }
}

/// GET /expenses/export/csv - Download the visible set as a CSV attachment.
async fn export_csv(State(state): State<AppState>, auth: AuthUser) -> Response {
    let rows = match visible_rows(&state, &auth).await {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "Failed to list expenses for export");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let entries: Vec<ReportEntry> = rows.iter().map(to_report_entry).collect();
    let privileged = auth.role().visibility() == Visibility::All;

    let csv = render_csv(&entries, privileged);
    let filename = attachment_filename(chrono::Utc::now().date_naive());

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_review_status_accepts_decisions() {
        assert_eq!(
            parse_review_status("Approved"),
            Some(ExpenseStatus::Approved)
        );
        assert_eq!(
            parse_review_status("rejected"),
            Some(ExpenseStatus::Rejected)
        );
    }

    #[test]
    fn test_parse_review_status_refuses_everything_else() {
        assert_eq!(parse_review_status("Pending"), None);
        assert_eq!(parse_review_status("archived"), None);
        assert_eq!(parse_review_status(""), None);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(500)), "500.00");
        assert_eq!(format_money(dec!(12.5)), "12.50");
        assert_eq!(format_money(dec!(0.999)), "1.00");
    }
}
