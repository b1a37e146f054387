//! Order domain types and checkout form validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use elegant_core::{
    CheckoutType, Email, Localized, OrderId, OrderStatus, PaymentMethod, ProductId, UserId,
};

/// Where an order ships to and who to contact about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// Checkout form validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutInputError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
}

impl CheckoutInputError {
    /// Short code used in page redirects (`?error=...`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_fields",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

/// Checkout request body, shared by the JSON API and the checkout form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub checkout_type: CheckoutType,
}

impl CheckoutRequest {
    /// Validate the shipping fields. Every field is required.
    ///
    /// # Errors
    ///
    /// Returns the first missing field, or [`CheckoutInputError::InvalidEmail`].
    pub fn shipping_details(&self) -> Result<ShippingDetails, CheckoutInputError> {
        let required = |value: &str, field: &'static str| {
            let value = value.trim();
            if value.is_empty() {
                Err(CheckoutInputError::MissingField(field))
            } else {
                Ok(value.to_owned())
            }
        };

        let first_name = required(&self.first_name, "firstName")?;
        let last_name = required(&self.last_name, "lastName")?;
        let email = required(&self.email, "email")?;
        let phone = required(&self.phone, "phone")?;
        let address = required(&self.address, "address")?;
        let city = required(&self.city, "city")?;
        let postal_code = required(&self.postal_code, "postalCode")?;

        let email = Email::parse(&email).map_err(|_| CheckoutInputError::InvalidEmail)?;

        Ok(ShippingDetails {
            first_name,
            last_name,
            email,
            phone,
            address,
            city,
            postal_code,
        })
    }
}

/// Checkout details for an order. Lines and totals come from the user's
/// cart as read inside the order transaction.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub payment_method: PaymentMethod,
    pub checkout_type: CheckoutType,
    pub shipping: ShippingDetails,
    pub shipping_flat_rate: Decimal,
}

/// One purchased line, with name and price as they were at checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// `None` once the product has been deleted.
    pub product_id: Option<ProductId>,
    #[serde(skip)]
    pub name: Localized<String>,
    pub size: String,
    pub color: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub checkout_type: CheckoutType,
    pub shipping: ShippingDetails,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Total number of units in the order.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }
}

/// JSON shape of an order line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub product_id: Option<ProductId>,
    pub name: String,
    pub name_ar: String,
    pub size: String,
    pub color: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

/// JSON shape of an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub checkout_type: CheckoutType,
    pub shipping_address: ShippingDetails,
    pub items: Vec<OrderLineResponse>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            status: order.status,
            payment_method: order.payment_method,
            checkout_type: order.checkout_type,
            shipping_address: order.shipping,
            items: order
                .lines
                .into_iter()
                .map(|line| OrderLineResponse {
                    product_id: line.product_id,
                    name: line.name.en,
                    name_ar: line.name.ar,
                    size: line.size,
                    color: line.color,
                    price: line.unit_price,
                    quantity: line.quantity,
                })
                .collect(),
            subtotal: order.subtotal,
            shipping: order.shipping_cost,
            total: order.total,
            created_at: order.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            first_name: "Noura".to_owned(),
            last_name: "Al-Harbi".to_owned(),
            email: "Noura@Example.com".to_owned(),
            phone: "+966501234567".to_owned(),
            address: "King Fahd Road 12".to_owned(),
            city: "Riyadh".to_owned(),
            postal_code: "12211".to_owned(),
            ..CheckoutRequest::default()
        }
    }

    #[test]
    fn test_shipping_details_valid() {
        let details = request().shipping_details().unwrap();
        assert_eq!(details.email.as_str(), "noura@example.com");
        assert_eq!(details.city, "Riyadh");
    }

    #[test]
    fn test_shipping_details_reports_first_missing_field() {
        let mut req = request();
        req.phone = "  ".to_owned();
        req.city = String::new();
        assert_eq!(
            req.shipping_details(),
            Err(CheckoutInputError::MissingField("phone"))
        );
    }

    #[test]
    fn test_shipping_details_rejects_bad_email() {
        let mut req = request();
        req.email = "not-an-email".to_owned();
        let err = req.shipping_details().unwrap_err();
        assert_eq!(err, CheckoutInputError::InvalidEmail);
        assert_eq!(err.code(), "invalid_email");
    }

    #[test]
    fn test_checkout_request_defaults() {
        let req: CheckoutRequest = serde_json::from_str(r#"{"paymentMethod":"bank"}"#).unwrap();
        assert_eq!(req.payment_method, PaymentMethod::Bank);
        assert_eq!(req.checkout_type, CheckoutType::Guest);
    }
}
