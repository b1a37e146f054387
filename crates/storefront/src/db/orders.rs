//! Order repository.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use elegant_core::{
    Cart, CheckoutType, Email, LineKey, Localized, OrderId, OrderStatus, PaymentMethod, ProductId,
    UserId,
};

use super::{CartRepository, RepositoryError};
use crate::models::order::{NewOrder, Order, OrderLine, ShippingDetails};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    status: OrderStatus,
    payment_method: PaymentMethod,
    checkout_type: CheckoutType,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    postal_code: String,
    subtotal: Decimal,
    shipping: Decimal,
    total: Decimal,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    order_id: OrderId,
    product_id: Option<ProductId>,
    name: String,
    name_ar: String,
    size: String,
    color: String,
    unit_price: Decimal,
    quantity: i32,
}

impl TryFrom<OrderLineRow> for OrderLine {
    type Error = RepositoryError;

    fn try_from(row: OrderLineRow) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!("negative order quantity: {}", row.quantity))
        })?;

        Ok(Self {
            product_id: row.product_id,
            name: Localized::new(row.name, row.name_ar),
            size: row.size,
            color: row.color,
            unit_price: row.unit_price,
            quantity,
        })
    }
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLine>) -> Result<Order, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            status: self.status,
            payment_method: self.payment_method,
            checkout_type: self.checkout_type,
            shipping: ShippingDetails {
                first_name: self.first_name,
                last_name: self.last_name,
                email,
                phone: self.phone,
                address: self.address,
                city: self.city,
                postal_code: self.postal_code,
            },
            subtotal: self.subtotal,
            shipping_cost: self.shipping,
            total: self.total,
            created_at: self.created_at,
            lines,
        })
    }
}

/// Repository for orders placed through checkout.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Turn the user's cart into an order, atomically.
    ///
    /// The cart rows are read and locked inside the transaction, priced at
    /// current product prices, and only those rows are deleted afterwards.
    /// Lines added while this runs stay in the cart. Returns `None`, writing
    /// nothing, when the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// written in that case.
    pub async fn create(&self, order: &NewOrder) -> Result<Option<Order>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cart = Cart::from_lines(CartRepository::lock_lines(&mut *tx, order.user_id).await?);
        if cart.is_empty() {
            tx.rollback().await?;
            return Ok(None);
        }
        let totals = cart.totals(order.shipping_flat_rate);

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO shop.order
                (user_id, payment_method, checkout_type, first_name, last_name, email, phone,
                 address, city, postal_code, subtotal, shipping, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, user_id, status, payment_method, checkout_type, first_name,
                      last_name, email, phone, address, city, postal_code, subtotal,
                      shipping, total, created_at
            ",
        )
        .bind(order.user_id)
        .bind(order.payment_method)
        .bind(order.checkout_type)
        .bind(&order.shipping.first_name)
        .bind(&order.shipping.last_name)
        .bind(order.shipping.email.as_str())
        .bind(&order.shipping.phone)
        .bind(&order.shipping.address)
        .bind(&order.shipping.city)
        .bind(&order.shipping.postal_code)
        .bind(totals.subtotal)
        .bind(totals.shipping)
        .bind(totals.total)
        .fetch_one(&mut *tx)
        .await?;

        let mut lines = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            let quantity = i32::try_from(line.quantity).unwrap_or(i32::MAX);
            let inserted = sqlx::query_as::<_, OrderLineRow>(
                r"
                INSERT INTO shop.order_line
                    (order_id, product_id, name, name_ar, size, color, unit_price, quantity)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING order_id, product_id, name, name_ar, size, color, unit_price, quantity
                ",
            )
            .bind(row.id)
            .bind(line.key.product_id)
            .bind(&line.name.en)
            .bind(&line.name.ar)
            .bind(&line.key.size)
            .bind(&line.key.color)
            .bind(line.unit_price)
            .bind(quantity)
            .fetch_one(&mut *tx)
            .await?;
            lines.push(OrderLine::try_from(inserted)?);
        }

        let ordered: Vec<&LineKey> = cart.lines().iter().map(|line| &line.key).collect();
        CartRepository::delete_lines(&mut *tx, order.user_id, &ordered).await?;

        tx.commit().await?;

        row.into_order(lines).map(Some)
    }

    /// A user's orders, newest first, with their lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, status, payment_method, checkout_type, first_name, last_name,
                   email, phone, address, city, postal_code, subtotal, shipping, total,
                   created_at
            FROM shop.order
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = rows.iter().map(|r| r.id.as_i32()).collect();
        let line_rows = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT order_id, product_id, name, name_ar, size, color, unit_price, quantity
            FROM shop.order_line
            WHERE order_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut lines_by_order: HashMap<OrderId, Vec<OrderLine>> = HashMap::new();
        for line in line_rows {
            let order_id = line.order_id;
            lines_by_order
                .entry(order_id)
                .or_default()
                .push(OrderLine::try_from(line)?);
        }

        rows.into_iter()
            .map(|row| {
                let lines = lines_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(lines)
            })
            .collect()
    }

    /// Number of orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM shop.order")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
