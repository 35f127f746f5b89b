//! Authentication routes for register, login, and the user listing.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser, routes::error_response};
use corpspend_core::auth::{hash_password, verify_password};
use corpspend_core::policy::Role;
use corpspend_db::UserRepository;
use corpspend_db::repositories::CreateUserInput;
use corpspend_shared::AppError;
use corpspend_shared::auth::{AuthResponse, LoginRequest, RegisterRequest, UserSummary};

/// Identical for unknown email and wrong password, so a caller cannot probe
/// which accounts exist.
const INVALID_CREDENTIALS: &str = "Invalid Credentials";

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Creates the auth routes that sit behind the auth middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/users", get(get_users))
}

/// POST /auth/register - Create an account and return a bearer token.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let username = payload.username.as_deref().unwrap_or("").trim().to_string();
    let email = payload
        .email
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let password = payload.password.unwrap_or_default();

    if username.is_empty() || email.is_empty() || password.is_empty() {
        return error_response(&AppError::Validation(
            "Username, email and password are required".to_string(),
        ));
    }

    // Anything outside the closed role set silently registers as employee.
    let role = Role::parse_or_employee(payload.role.as_deref());
    let department = payload
        .department
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "General".to_string());

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&email).await {
        Ok(true) => {
            return error_response(&AppError::Duplicate("User already exists".to_string()));
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return error_response(&AppError::Database(e.to_string()));
        }
    }

    let password_hash = match hash_password(&password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return error_response(&AppError::Internal(e.to_string()));
        }
    };

    let user = match user_repo
        .create(CreateUserInput {
            username,
            email,
            password_hash,
            department,
            role: role.into(),
        })
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let token = match state.jwt_service.generate_token(user.id, role.as_str(), None) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return error_response(&AppError::Internal(e.to_string()));
        }
    };

    info!(user_id = %user.id, email = %user.email, role = %role, "New user registered");

    (
        StatusCode::OK,
        Json(AuthResponse {
            token,
            role: role.as_str().to_string(),
        }),
    )
        .into_response()
}

/// POST /auth/login - Authenticate and return a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let email = payload
        .email
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let password = payload.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return error_response(&AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %email, "Login attempt for non-existent user");
            return error_response(&AppError::Validation(INVALID_CREDENTIALS.to_string()));
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    match verify_password(&password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return error_response(&AppError::Validation(INVALID_CREDENTIALS.to_string()));
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return error_response(&AppError::Internal(e.to_string()));
        }
    }

    let role = Role::from(&user.role);
    let token = match state
        .jwt_service
        .generate_token(user.id, role.as_str(), Some(&user.username))
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return error_response(&AppError::Internal(e.to_string()));
        }
    };

    info!(user_id = %user.id, "User logged in successfully");

    (
        StatusCode::OK,
        Json(AuthResponse {
            token,
            role: role.as_str().to_string(),
        }),
    )
        .into_response()
}

/// GET /auth/users - List all users, without the credential field.
///
/// Open to every authenticated role, not just admins.
async fn get_users(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let users = match user_repo.list_all().await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to list users");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    let summaries: Vec<UserSummary> = users
        .into_iter()
        .map(|u| UserSummary {
            id: u.id,
            username: u.username,
            email: u.email,
            department: u.department,
            role: Role::from(&u.role).as_str().to_string(),
        })
        .collect();

    (StatusCode::OK, Json(summaries)).into_response()
}
