//! Status and role enums for storefront entities.
//!
//! With the `postgres` feature these map onto the enum types created by the
//! storefront migrations in the `shop` schema.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Account role. Admins can use the admin dashboard and admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
}

impl UserRole {
    /// Whether this role grants access to the admin surface.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// How the customer pays. No gateway is involved for either method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.payment_method", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    /// Bank transfer.
    Bank,
}

impl PaymentMethod {
    /// Human-readable label in the given locale.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Cod, Locale::En) => "Cash on delivery",
            (Self::Cod, Locale::Ar) => "الدفع عند الاستلام",
            (Self::Bank, Locale::En) => "Bank transfer",
            (Self::Bank, Locale::Ar) => "تحويل بنكي",
        }
    }
}

/// Whether the order was placed as a guest or as a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.checkout_type", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutType {
    #[default]
    Guest,
    Member,
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.order_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Completed,
}

impl OrderStatus {
    /// Human-readable label in the given locale.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Pending, Locale::En) => "Pending",
            (Self::Pending, Locale::Ar) => "معلق",
            (Self::Processing, Locale::En) => "Processing",
            (Self::Processing, Locale::Ar) => "قيد المعالجة",
            (Self::Shipped, Locale::En) => "Shipped",
            (Self::Shipped, Locale::Ar) => "تم الشحن",
            (Self::Completed, Locale::En) => "Completed",
            (Self::Completed, Locale::Ar) => "مكتمل",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_round_trips_through_str() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(UserRole::Customer.to_string(), "customer");
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_role_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            "\"ADMIN\""
        );
    }

    #[test]
    fn test_payment_method_wire_names() {
        let method: PaymentMethod = serde_json::from_str("\"bank\"").unwrap();
        assert_eq!(method, PaymentMethod::Bank);
        assert_eq!(PaymentMethod::Cod.label(Locale::En), "Cash on delivery");
    }

    #[test]
    fn test_order_status_labels() {
        assert_eq!(OrderStatus::Shipped.label(Locale::Ar), "تم الشحن");
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
