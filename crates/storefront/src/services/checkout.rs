//! Checkout: turn a user's cart into an order.
//!
//! No payment gateway is involved and stock is not decremented. The order is
//! priced from the cart as read inside the order transaction, at current
//! product prices.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use elegant_core::UserId;

use crate::db::{OrderRepository, RepositoryError};
use crate::models::order::{CheckoutInputError, CheckoutRequest, NewOrder, Order};

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Input(#[from] CheckoutInputError),
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CheckoutError {
    /// Short code used in page redirects (`?error=...`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyCart => "empty_cart",
            Self::Input(e) => e.code(),
            Self::Repository(_) => "server_error",
        }
    }
}

/// Places orders with a flat shipping charge.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
    shipping_flat_rate: Decimal,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, shipping_flat_rate: Decimal) -> Self {
        Self {
            pool,
            shipping_flat_rate,
        }
    }

    /// Place an order for the user's current cart.
    ///
    /// The checkout type from the form is recorded as sent.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Input` for invalid shipping details and
    /// `CheckoutError::EmptyCart` when there is nothing to order.
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn place_order(
        &self,
        user_id: UserId,
        request: &CheckoutRequest,
    ) -> Result<Order, CheckoutError> {
        let shipping = request.shipping_details()?;

        let order = OrderRepository::new(self.pool)
            .create(&NewOrder {
                user_id,
                payment_method: request.payment_method,
                checkout_type: request.checkout_type,
                shipping,
                shipping_flat_rate: self.shipping_flat_rate,
            })
            .await?
            .ok_or(CheckoutError::EmptyCart)?;

        tracing::info!(
            order_id = %order.id,
            items = order.item_count(),
            subtotal = %order.subtotal,
            shipping = %order.shipping_cost,
            total = %order.total,
            payment_method = ?order.payment_method,
            checkout_type = ?order.checkout_type,
            "Order placed"
        );

        Ok(order)
    }
}
