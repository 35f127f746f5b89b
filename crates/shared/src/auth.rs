//! Authentication types for JWT claims and auth payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User's role, as its lowercase wire string.
    pub role: String,
    /// Display name, present on tokens issued at login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, role: &str, name: Option<&str>, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            name: name.map(str::to_string),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Registration request payload.
///
/// Required fields are optional here so a missing one surfaces as a
/// validation message instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: Option<String>,
    /// User email.
    pub email: Option<String>,
    /// User password.
    pub password: Option<String>,
    /// Department (defaults to "General").
    pub department: Option<String>,
    /// Requested role; anything outside the closed set falls back to employee.
    pub role: Option<String>,
}

/// Login request payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// User email.
    pub email: Option<String>,
    /// User password.
    pub password: Option<String>,
}

/// Response for successful register/login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Signed bearer token.
    pub token: String,
    /// The authenticated user's role.
    pub role: String,
}

/// User info returned by the user listing (credential field omitted).
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Department.
    pub department: String,
    /// Role.
    pub role: String,
}
