//! Customer email addresses.
//!
//! Accounts are keyed by email, and checkout records the address the order
//! confirmation goes to. Both paths share [`Email::parse`], which stores the
//! address trimmed and lowercased, so `Admin@Elegant.SA` and
//! `admin@elegant.sa` are one account.
//!
//! The shape check is stricter than a browser's `<input type="email">`: the
//! domain must contain a dot, so dotless hosts such as `localhost` are
//! refused.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why an address was rejected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Empty,
    #[error("email must be at most {} characters", Email::MAX_LENGTH)]
    TooLong,
    #[error("email must look like name@domain.tld")]
    Malformed,
}

/// A validated, lowercased email address.
///
/// ```
/// use elegant_core::Email;
///
/// assert_eq!(Email::parse(" Admin@Elegant.SA ").unwrap().as_str(), "admin@elegant.sa");
/// assert!(Email::parse("customer@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Longest address an SMTP server must accept.
    pub const MAX_LENGTH: usize = 254;

    /// Validate and normalize an address.
    ///
    /// One `@`, a non-empty name, and a domain with at least one dot and no
    /// empty labels. Whitespace inside the address is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] describing the first failed rule.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let address = input.trim();
        if address.is_empty() {
            return Err(EmailError::Empty);
        }
        if address.chars().count() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong);
        }
        if address.chars().any(char::is_whitespace) {
            return Err(EmailError::Malformed);
        }

        let (name, domain) = address.split_once('@').ok_or(EmailError::Malformed)?;
        let domain_ok = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
        if name.is_empty() || domain.contains('@') || !domain_ok {
            return Err(EmailError::Malformed);
        }

        Ok(Self(address.to_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Everything after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_store_addresses() {
        for address in [
            "customer@elegant.sa",
            "noura.saleh+orders@mail.example.com",
            "a@b.co",
        ] {
            assert!(Email::parse(address).is_ok(), "{address}");
        }
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let email = Email::parse("  Customer@Elegant.SA\n").unwrap();
        assert_eq!(email.as_str(), "customer@elegant.sa");
        assert_eq!(email.domain(), "elegant.sa");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
        assert_eq!(
            Email::parse(&format!("{}@elegant.sa", "a".repeat(250))),
            Err(EmailError::TooLong)
        );
        for address in [
            "no-at-symbol",
            "@elegant.sa",
            "customer@",
            "customer@localhost",
            "customer@elegant..sa",
            "customer@.sa",
            "a@b@elegant.sa",
            "first last@elegant.sa",
        ] {
            assert_eq!(Email::parse(address), Err(EmailError::Malformed), "{address}");
        }
    }

    #[test]
    fn test_dotless_domain_is_refused() {
        assert_eq!(Email::parse("customer@localhost"), Err(EmailError::Malformed));
        assert!(Email::parse("customer@localhost.localdomain").is_ok());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let email: Email = "user@example.com".parse().unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"user@example.com\"");
        assert_eq!(email.to_string(), "user@example.com");
    }
}
