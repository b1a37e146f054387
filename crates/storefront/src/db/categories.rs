//! Category repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use elegant_core::{CategoryId, Localized};

use super::RepositoryError;
use crate::models::category::{Category, NewCategory};

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    name_ar: String,
    description: Option<String>,
    description_ar: Option<String>,
    image: Option<String>,
    product_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: Localized::new(row.name, row.name_ar),
            description: Localized::new(row.description, row.description_ar),
            image: row.image,
            product_count: row.product_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_CATEGORY: &str = r"
    SELECT c.id, c.name, c.name_ar, c.description, c.description_ar, c.image,
           (SELECT COUNT(*) FROM shop.product p WHERE p.category_id = c.id) AS product_count,
           c.created_at, c.updated_at
    FROM shop.category c
";

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by English name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!("{SELECT_CATEGORY} ORDER BY c.name"))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!("{SELECT_CATEGORY} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Category::from))
    }

    /// Get a category by its English name (exact match).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        let row =
            sqlx::query_as::<_, CategoryRow>(&format!("{SELECT_CATEGORY} WHERE c.name = $1"))
                .bind(name)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Category::from))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is taken.
    pub async fn create(&self, category: &NewCategory) -> Result<Category, RepositoryError> {
        let id: CategoryId = sqlx::query_scalar(
            r"
            INSERT INTO shop.category (name, name_ar, description, description_ar, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(&category.name.en)
        .bind(&category.name.ar)
        .bind(category.description.en.as_deref())
        .bind(category.description.ar.as_deref())
        .bind(category.image.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_constraint(e, "category name already exists", "category")
        })?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Create a category, or update the one with the same English name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_by_name(&self, category: &NewCategory) -> Result<Category, RepositoryError> {
        let id: CategoryId = sqlx::query_scalar(
            r"
            INSERT INTO shop.category (name, name_ar, description, description_ar, image)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO UPDATE
            SET name_ar = EXCLUDED.name_ar,
                description = EXCLUDED.description,
                description_ar = EXCLUDED.description_ar,
                image = EXCLUDED.image,
                updated_at = NOW()
            RETURNING id
            ",
        )
        .bind(&category.name.en)
        .bind(&category.name.ar)
        .bind(category.description.en.as_deref())
        .bind(category.description.ar.as_deref())
        .bind(category.image.as_deref())
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Replace a category's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new name is taken.
    pub async fn update(
        &self,
        id: CategoryId,
        category: &NewCategory,
    ) -> Result<Category, RepositoryError> {
        let updated: Option<CategoryId> = sqlx::query_scalar(
            r"
            UPDATE shop.category
            SET name = $1, name_ar = $2, description = $3, description_ar = $4, image = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING id
            ",
        )
        .bind(&category.name.en)
        .bind(&category.name.ar)
        .bind(category.description.en.as_deref())
        .bind(category.description.ar.as_deref())
        .bind(category.image.as_deref())
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_constraint(e, "category name already exists", "category")
        })?;

        let id = updated.ok_or(RepositoryError::NotFound)?;
        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::Conflict` if products still reference it.
    pub async fn delete(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.category WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict("category still has products".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Number of categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM shop.category")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
