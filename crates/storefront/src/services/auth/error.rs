//! Account and login failures.

use thiserror::Error;

use crate::db::RepositoryError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] elegant_core::EmailError),

    /// Wrong password, or no account for the email. Login never says which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account with the given id or email (session lookups, CLI).
    #[error("user not found")]
    UserNotFound,

    #[error("user already exists")]
    UserAlreadyExists,

    /// Carries the rule the password broke.
    #[error("{0}")]
    WeakPassword(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Argon2 failed to hash or parse a stored hash.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Value of `?error=` on the login and register pages.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials | Self::UserNotFound => "invalid_credentials",
            Self::UserAlreadyExists => "email_taken",
            Self::InvalidEmail(_) => "invalid_email",
            Self::WeakPassword(_) => "weak_password",
            Self::MissingField(_) => "missing_fields",
            Self::Repository(_) | Self::PasswordHash => "server_error",
        }
    }
}
