//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Each variant maps to an HTTP status and a client-safe message. Internal
/// details (database errors, token signing failures) never reach the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate identity (e.g. email already registered).
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Email delivery error.
    #[error("Email delivery error: {0}")]
    Email(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) | Self::Duplicate(_) => 400,
            Self::Database(_) | Self::Email(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the message that may be shown to API clients.
    ///
    /// Database and internal errors are collapsed to a generic message; email
    /// delivery errors surface the channel's own message so a misconfigured
    /// mail setup is diagnosable from the client side.
    #[must_use]
    pub fn public_message(&self) -> &str {
        match self {
            Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Duplicate(msg)
            | Self::Email(msg) => msg,
            Self::Database(_) | Self::Internal(_) => "Server error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Unauthorized(String::new()).status_code(), 401);
        assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::Duplicate(String::new()).status_code(), 400);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Email(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_public_message_hides_internal_detail() {
        let err = AppError::Database("connection reset by peer".into());
        assert_eq!(err.public_message(), "Server error");

        let err = AppError::Internal("poisoned lock".into());
        assert_eq!(err.public_message(), "Server error");
    }

    #[test]
    fn test_public_message_passes_through_client_errors() {
        assert_eq!(
            AppError::Validation("Title is required".into()).public_message(),
            "Title is required"
        );
        assert_eq!(
            AppError::Duplicate("User already exists".into()).public_message(),
            "User already exists"
        );
        assert_eq!(
            AppError::Email("SMTP relay refused".into()).public_message(),
            "SMTP relay refused"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Forbidden("msg".into()).to_string(),
            "Access denied: msg"
        );
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
    }
}
