//! Subcommand implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Primary database URL variable.
pub const DATABASE_URL_VAR: &str = "STOREFRONT_DATABASE_URL";

/// Database URL from `STOREFRONT_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// Loads `.env` first so the CLI sees the same settings as the server.
pub fn database_url() -> Option<SecretString> {
    dotenvy::dotenv().ok();
    std::env::var(DATABASE_URL_VAR)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
