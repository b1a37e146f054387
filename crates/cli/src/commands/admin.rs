//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new administrator
//! elegant-cli admin create -e admin@example.com -p 's3cret-pass' --first-name Noura
//!
//! # Give an existing customer account admin rights
//! elegant-cli admin promote -e customer@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

use thiserror::Error;

use elegant_core::{UserId, UserRole};
use elegant_storefront::db;
use elegant_storefront::services::auth::{AuthError, AuthService, Registration};

use super::{DATABASE_URL_VAR, database_url};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// User already exists.
    #[error("A user already exists with email: {0}. Use `admin promote` instead")]
    UserExists(String),

    /// No account to promote.
    #[error("No user found with email: {0}")]
    UserNotFound(String),

    /// Any other account error (invalid email, weak password, ...).
    #[error(transparent)]
    Auth(#[from] AuthError),
}

async fn connect() -> Result<sqlx::PgPool, AdminError> {
    let url = database_url().ok_or(AdminError::MissingEnvVar(DATABASE_URL_VAR))?;
    tracing::info!("Connecting to storefront database...");
    Ok(db::create_pool(&url).await?)
}

/// Create a new admin account.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns `AdminError::UserExists` if the email is taken, or the
/// validation error for a bad email or weak password.
pub async fn create_user(
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Result<UserId, AdminError> {
    let pool = connect().await?;

    tracing::info!("Creating admin user: {email}");
    let registration = Registration {
        email: email.to_owned(),
        password: password.to_owned(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        phone: None,
    };
    let user = AuthService::new(&pool)
        .register(&registration, UserRole::Admin)
        .await
        .map_err(|e| match e {
            AuthError::UserAlreadyExists => AdminError::UserExists(email.to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!(user_id = %user.id, "Admin user created: {}", user.email);
    Ok(user.id)
}

/// Give an existing account the admin role.
///
/// # Errors
///
/// Returns `AdminError::UserNotFound` if no account has this email.
pub async fn promote(email: &str) -> Result<UserId, AdminError> {
    let pool = connect().await?;

    let user = AuthService::new(&pool)
        .set_role(email, UserRole::Admin)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound => AdminError::UserNotFound(email.to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!(user_id = %user.id, "Promoted {} to admin", user.email);
    Ok(user.id)
}
