//! Product repository.
//!
//! Filters are expressed as optional parameters in static SQL
//! (`$1::bool IS FALSE OR ...`) so every query is a single prepared statement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use elegant_core::{CategoryId, Localized, ProductId};

use super::RepositoryError;
use crate::models::product::{NewProduct, Product};

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    name_ar: String,
    description: Option<String>,
    description_ar: Option<String>,
    price: Decimal,
    image: Option<String>,
    category_id: CategoryId,
    category_name: String,
    sizes: Json<Vec<String>>,
    colors: Json<Vec<String>>,
    in_stock: bool,
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: Localized::new(row.name, row.name_ar),
            description: Localized::new(row.description, row.description_ar),
            price: row.price,
            image: row.image,
            category_id: row.category_id,
            category_name: row.category_name,
            sizes: row.sizes.0,
            colors: row.colors.0,
            in_stock: row.in_stock,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_PRODUCT: &str = r"
    SELECT p.id, p.name, p.name_ar, p.description, p.description_ar, p.price, p.image,
           p.category_id, c.name AS category_name, p.sizes, p.colors, p.in_stock,
           p.featured, p.created_at, p.updated_at
    FROM shop.product p
    JOIN shop.category c ON c.id = p.category_id
";

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only featured products.
    pub featured: bool,
    /// English category name, exact match.
    pub category: Option<String>,
    /// Maximum number of rows.
    pub limit: Option<i64>,
}

/// One page of the admin product list.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
}

/// Escape `LIKE` wildcards and wrap the term for a substring match.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products newest first, applying the catalog filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "{SELECT_PRODUCT}
            WHERE ($1::bool IS FALSE OR p.featured)
              AND ($2::text IS NULL OR c.name = $2)
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $3"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(filter.featured)
            .bind(filter.category.as_deref())
            .bind(filter.limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// One page of products for the admin list, newest first.
    ///
    /// `search` matches the English or Arabic name case-insensitively;
    /// `category` matches the English category name exactly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_page(
        &self,
        page: i64,
        limit: i64,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<ProductPage, RepositoryError> {
        let pattern = search.map(contains_pattern);
        let offset = (page - 1).saturating_mul(limit);

        let sql = format!(
            "{SELECT_PRODUCT}
            WHERE ($1::text IS NULL OR p.name ILIKE $1 OR p.name_ar ILIKE $1)
              AND ($2::text IS NULL OR c.name = $2)
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $3 OFFSET $4"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(pattern.as_deref())
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM shop.product p
            JOIN shop.category c ON c.id = p.category_id
            WHERE ($1::text IS NULL OR p.name ILIKE $1 OR p.name_ar ILIKE $1)
              AND ($2::text IS NULL OR c.name = $2)
            ",
        )
        .bind(pattern.as_deref())
        .bind(category)
        .fetch_one(self.pool)
        .await?;

        Ok(ProductPage {
            products: rows.into_iter().map(Product::from).collect(),
            total,
        })
    }

    /// Other products in the same category, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_related(
        &self,
        product: &Product,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "{SELECT_PRODUCT}
            WHERE p.category_id = $1 AND p.id <> $2
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $3"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(product.category_id)
            .bind(product.id)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Find a product ID by English name within a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_id_by_name(
        &self,
        category_id: CategoryId,
        name: &str,
    ) -> Result<Option<ProductId>, RepositoryError> {
        let id = sqlx::query_scalar(
            "SELECT id FROM shop.product WHERE category_id = $1 AND name = $2 LIMIT 1",
        )
        .bind(category_id)
        .bind(name)
        .fetch_optional(self.pool)
        .await?;
        Ok(id)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the category doesn't exist.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let id: ProductId = sqlx::query_scalar(
            r"
            INSERT INTO shop.product
                (name, name_ar, description, description_ar, price, image, category_id,
                 sizes, colors, in_stock, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            ",
        )
        .bind(&product.name.en)
        .bind(&product.name.ar)
        .bind(product.description.en.as_deref())
        .bind(product.description.ar.as_deref())
        .bind(product.price)
        .bind(product.image.as_deref())
        .bind(product.category_id)
        .bind(Json(&product.sizes))
        .bind(Json(&product.colors))
        .bind(product.in_stock)
        .bind(product.featured)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_constraint(e, "product already exists", "category"))?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::InvalidReference` if the category doesn't exist.
    pub async fn update(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let updated: Option<ProductId> = sqlx::query_scalar(
            r"
            UPDATE shop.product
            SET name = $1, name_ar = $2, description = $3, description_ar = $4, price = $5,
                image = $6, category_id = $7, sizes = $8, colors = $9, in_stock = $10,
                featured = $11, updated_at = NOW()
            WHERE id = $12
            RETURNING id
            ",
        )
        .bind(&product.name.en)
        .bind(&product.name.ar)
        .bind(product.description.en.as_deref())
        .bind(product.description.ar.as_deref())
        .bind(product.price)
        .bind(product.image.as_deref())
        .bind(product.category_id)
        .bind(Json(&product.sizes))
        .bind(Json(&product.colors))
        .bind(product.in_stock)
        .bind(product.featured)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_constraint(e, "product already exists", "category"))?;

        let id = updated.ok_or(RepositoryError::NotFound)?;
        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product. Cart rows referencing it go with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Number of products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM shop.product")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("abaya"), "%abaya%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("عباية"), "%عباية%");
    }
}
