//! Cart service.
//!
//! Validates add-to-cart requests against the catalog and keeps the persisted
//! rows and the in-memory [`Cart`] in step.

use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use elegant_core::{Cart, LineKey, QuantityChange, UserId};

use crate::db::{CartRepository, ProductRepository, RepositoryError};

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product not found")]
    ProductNotFound,
    #[error("Product is out of stock")]
    OutOfStock,
    #[error("Size {0} is not available")]
    InvalidSize(String),
    #[error("Color {0} is not available")]
    InvalidColor(String),
    #[error("Cart item not found")]
    LineNotFound,
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CartError {
    /// Short code used in page redirects (`?error=...`).
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ProductNotFound => "product_not_found",
            Self::OutOfStock => "out_of_stock",
            Self::InvalidSize(_) => "invalid_size",
            Self::InvalidColor(_) => "invalid_color",
            Self::LineNotFound => "line_not_found",
            Self::Repository(_) => "server_error",
        }
    }
}

/// Cart operations for one authenticated user.
pub struct CartService<'a> {
    pool: &'a PgPool,
    user_id: UserId,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, user_id: UserId) -> Self {
        Self { pool, user_id }
    }

    fn repo(&self) -> CartRepository<'a> {
        CartRepository::new(self.pool)
    }

    /// Load the cart at current product prices.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn load(&self) -> Result<Cart, CartError> {
        let lines = self.repo().lines(self.user_id).await?;
        Ok(Cart::from_lines(lines))
    }

    /// Add one unit of a line, merging with an existing line of the same key.
    ///
    /// The product must exist and be in stock, and the size and color must be
    /// among its options when it lists any. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns the matching `CartError` when validation fails.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn add(&self, key: &LineKey) -> Result<u32, CartError> {
        let product = ProductRepository::new(self.pool)
            .get_by_id(key.product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        if !product.in_stock {
            return Err(CartError::OutOfStock);
        }
        if !product.offers_size(&key.size) {
            return Err(CartError::InvalidSize(key.size.clone()));
        }
        if !product.offers_color(&key.color) {
            return Err(CartError::InvalidColor(key.color.clone()));
        }

        let quantity = self
            .repo()
            .add(self.user_id, key)
            .await
            .map_err(|e| match e {
                RepositoryError::InvalidReference(_) => CartError::ProductNotFound,
                other => CartError::Repository(other),
            })?;

        tracing::info!(product_id = %key.product_id, quantity, "Added to cart");
        Ok(quantity)
    }

    /// Set a line's quantity; zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if no line matches the key.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn set_quantity(&self, key: &LineKey, quantity: i64) -> Result<QuantityChange, CartError> {
        match self.repo().set_quantity(self.user_id, key, quantity).await? {
            QuantityChange::Missing => Err(CartError::LineNotFound),
            change => Ok(change),
        }
    }

    /// Remove the line matching the full key.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if no line matches the key.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn remove(&self, key: &LineKey) -> Result<(), CartError> {
        if self.repo().remove(self.user_id, key).await? {
            Ok(())
        } else {
            Err(CartError::LineNotFound)
        }
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn clear(&self) -> Result<(), CartError> {
        self.repo().clear(self.user_id).await?;
        Ok(())
    }

    /// Units in the cart, for the header badge.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn item_count(&self) -> Result<i64, CartError> {
        Ok(self.repo().item_count(self.user_id).await?)
    }
}
