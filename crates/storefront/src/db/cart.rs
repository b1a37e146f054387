//! Cart repository.
//!
//! Rows are keyed by `(user_id, product_id, size, color)` under the
//! `cart_item_line_key` unique constraint. Update and removal always match the
//! full key, never the surrogate row id.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use elegant_core::{CartLine, LineKey, Localized, ProductId, QuantityChange, UserId};

use super::RepositoryError;

const CART_LINES: &str = r"
    SELECT ci.product_id, ci.size, ci.color, ci.quantity,
           p.name, p.name_ar, p.price, p.image
    FROM shop.cart_item ci
    JOIN shop.product p ON p.id = ci.product_id
    WHERE ci.user_id = $1
    ORDER BY ci.created_at, ci.id
";

#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    product_id: ProductId,
    size: String,
    color: String,
    quantity: i32,
    name: String,
    name_ar: String,
    price: Decimal,
    image: Option<String>,
}

impl TryFrom<CartLineRow> for CartLine {
    type Error = RepositoryError;

    fn try_from(row: CartLineRow) -> Result<Self, Self::Error> {
        let quantity = quantity_from_db(row.quantity)?;

        Ok(Self {
            key: LineKey::new(row.product_id, row.size, row.color),
            name: Localized::new(row.name, row.name_ar),
            unit_price: row.price,
            image: row.image,
            quantity,
        })
    }
}

fn quantity_from_db(quantity: i32) -> Result<u32, RepositoryError> {
    u32::try_from(quantity)
        .map_err(|_| RepositoryError::DataCorruption(format!("negative cart quantity: {quantity}")))
}

/// Repository for cart line items.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load a user's cart lines with current product names and prices, in
    /// the order they were first added.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(CART_LINES)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(CartLine::try_from).collect()
    }

    /// Like [`lines`](Self::lines), but row-locks the user's `cart_item` rows
    /// until `conn`'s transaction ends. Adds and quantity changes to those
    /// rows wait; brand-new lines are not seen.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lock_lines(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<Vec<CartLine>, RepositoryError> {
        let sql = format!("{CART_LINES} FOR UPDATE OF ci");
        let rows = sqlx::query_as::<_, CartLineRow>(&sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;

        rows.into_iter().map(CartLine::try_from).collect()
    }

    /// Delete exactly the given lines from a user's cart inside `conn`'s
    /// transaction. Other lines are left alone. Returns the rows deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_lines(
        conn: &mut PgConnection,
        user_id: UserId,
        keys: &[&LineKey],
    ) -> Result<u64, RepositoryError> {
        let product_ids: Vec<i32> = keys.iter().map(|k| k.product_id.as_i32()).collect();
        let sizes: Vec<&str> = keys.iter().map(|k| k.size.as_str()).collect();
        let colors: Vec<&str> = keys.iter().map(|k| k.color.as_str()).collect();

        let result = sqlx::query(
            r"
            DELETE FROM shop.cart_item ci
            USING UNNEST($2::int4[], $3::text[], $4::text[]) AS k(product_id, size, color)
            WHERE ci.user_id = $1
              AND ci.product_id = k.product_id
              AND ci.size = k.size
              AND ci.color = k.color
            ",
        )
        .bind(user_id)
        .bind(&product_ids)
        .bind(&sizes)
        .bind(&colors)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Add one unit of a line, creating the row or incrementing it.
    ///
    /// This is a single upsert on the line key, so concurrent adds of the
    /// same line cannot create duplicate rows or lose an increment. Returns
    /// the resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the product doesn't exist.
    pub async fn add(&self, user_id: UserId, key: &LineKey) -> Result<u32, RepositoryError> {
        let quantity: i32 = sqlx::query_scalar(
            r"
            INSERT INTO shop.cart_item (user_id, product_id, size, color, quantity)
            VALUES ($1, $2, $3, $4, 1)
            ON CONFLICT ON CONSTRAINT cart_item_line_key DO UPDATE
            SET quantity = shop.cart_item.quantity + 1, updated_at = NOW()
            RETURNING quantity
            ",
        )
        .bind(user_id)
        .bind(key.product_id)
        .bind(&key.size)
        .bind(&key.color)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_constraint(e, "cart line already exists", "product"))?;

        quantity_from_db(quantity)
    }

    /// Set the quantity of a line. Zero or less deletes the line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        key: &LineKey,
        quantity: i64,
    ) -> Result<QuantityChange, RepositoryError> {
        if quantity <= 0 {
            return Ok(if self.remove(user_id, key).await? {
                QuantityChange::Removed
            } else {
                QuantityChange::Missing
            });
        }

        let quantity = i32::try_from(quantity).unwrap_or(i32::MAX);
        let updated: Option<i32> = sqlx::query_scalar(
            r"
            UPDATE shop.cart_item
            SET quantity = $5, updated_at = NOW()
            WHERE user_id = $1 AND product_id = $2 AND size = $3 AND color = $4
            RETURNING quantity
            ",
        )
        .bind(user_id)
        .bind(key.product_id)
        .bind(&key.size)
        .bind(&key.color)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        match updated {
            Some(q) => Ok(QuantityChange::Updated(quantity_from_db(q)?)),
            None => Ok(QuantityChange::Missing),
        }
    }

    /// Remove the line matching the full key. Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(&self, user_id: UserId, key: &LineKey) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart_item
            WHERE user_id = $1 AND product_id = $2 AND size = $3 AND color = $4
            ",
        )
        .bind(user_id)
        .bind(key.product_id)
        .bind(&key.size)
        .bind(&key.color)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every line in a user's cart. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.cart_item WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Total units in a user's cart, for the header badge.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn item_count(&self, user_id: UserId) -> Result<i64, RepositoryError> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(quantity)::BIGINT FROM shop.cart_item WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count.unwrap_or(0))
    }
}
