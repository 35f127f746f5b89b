//! Shared types, errors, and configuration for CorpSpend.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT token service and claims
//! - Auth request/response payloads
//! - Email delivery service

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod jwt;

pub use auth::Claims;
pub use config::AppConfig;
pub use email::{DeliveryOutcome, EmailError, EmailService};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
