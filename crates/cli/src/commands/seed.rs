//! Database seeding command.
//!
//! # Usage
//!
//! ```bash
//! # Load the bundled demo catalog and accounts
//! elegant-cli seed
//!
//! # Load a different file, wiping catalog and order data first
//! elegant-cli seed --file my-catalog.yaml --reset
//! ```
//!
//! The seed file is YAML with three optional lists: `categories`, `products`
//! (each naming its category by English name) and `users`. Seeding is
//! idempotent: categories are matched by English name, products by category
//! and English name, and users by email.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

use elegant_core::{CategoryId, Localized, UserRole};
use elegant_storefront::db::{self, CategoryRepository, ProductRepository, RepositoryError};
use elegant_storefront::models::{NewCategory, NewProduct, PRICE_LIMIT};
use elegant_storefront::services::auth::{
    AuthError, AuthService, MIN_PASSWORD_LENGTH, Registration,
};

use super::{DATABASE_URL_VAR, database_url};

/// Seed file shipped with the CLI.
pub const DEFAULT_SEED_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/seed/catalog.yaml");

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The seed file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The seed file is not valid YAML for the expected shape.
    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The seed file parsed but its contents are inconsistent.
    #[error("Invalid seed file: {0}")]
    Invalid(String),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A repository write failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Creating or updating an account failed.
    #[error("Account error for {email}: {source}")]
    Account { email: String, source: AuthError },
}

/// Contents of a seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedCategory {
    pub name: String,
    pub name_ar: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_ar: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedProduct {
    pub name: String,
    pub name_ar: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_ar: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    /// English name of a category in the same file.
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
}

const fn in_stock_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

/// Counts reported after a successful seed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
    pub users: usize,
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

impl SeedFile {
    /// Parse a seed file from YAML.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Parse` on malformed YAML or unknown fields.
    pub fn from_yaml(text: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Check the file for problems the database would only catch halfway
    /// through a seed.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut category_names = HashSet::new();
        for category in &self.categories {
            let name = category.name.trim();
            if name.is_empty() || category.name_ar.trim().is_empty() {
                return Err(SeedError::Invalid(
                    "every category needs name and nameAr".to_owned(),
                ));
            }
            if !category_names.insert(name) {
                return Err(SeedError::Invalid(format!("duplicate category {name:?}")));
            }
        }

        let mut product_keys = HashSet::new();
        for product in &self.products {
            let name = product.name.trim();
            if name.is_empty() || product.name_ar.trim().is_empty() {
                return Err(SeedError::Invalid(
                    "every product needs name and nameAr".to_owned(),
                ));
            }
            if product.price <= Decimal::ZERO {
                return Err(SeedError::Invalid(format!(
                    "product {name:?} must have a positive price"
                )));
            }
            if product.price.round_dp(2) >= PRICE_LIMIT {
                return Err(SeedError::Invalid(format!(
                    "product {name:?} price must be below {PRICE_LIMIT}"
                )));
            }
            let category = product.category.trim();
            if !category_names.contains(category) {
                return Err(SeedError::Invalid(format!(
                    "product {name:?} references unknown category {category:?}"
                )));
            }
            if !product_keys.insert((category, name)) {
                return Err(SeedError::Invalid(format!(
                    "duplicate product {name:?} in {category:?}"
                )));
            }
        }

        let mut emails = HashSet::new();
        for user in &self.users {
            let email = user.email.trim().to_lowercase();
            if user.password.chars().count() < MIN_PASSWORD_LENGTH {
                return Err(SeedError::Invalid(format!(
                    "password for {email} must be at least {MIN_PASSWORD_LENGTH} characters"
                )));
            }
            if !emails.insert(email.clone()) {
                return Err(SeedError::Invalid(format!("duplicate user {email}")));
            }
        }

        Ok(())
    }
}

impl SeedCategory {
    fn to_new(&self) -> NewCategory {
        NewCategory {
            name: Localized::new(self.name.trim().to_owned(), self.name_ar.trim().to_owned()),
            description: Localized::new(
                non_empty(self.description.as_deref()),
                non_empty(self.description_ar.as_deref()),
            ),
            image: non_empty(self.image.as_deref()),
        }
    }
}

impl SeedProduct {
    fn to_new(&self, category_id: CategoryId) -> NewProduct {
        NewProduct {
            name: Localized::new(self.name.trim().to_owned(), self.name_ar.trim().to_owned()),
            description: Localized::new(
                non_empty(self.description.as_deref()),
                non_empty(self.description_ar.as_deref()),
            ),
            price: self.price,
            image: non_empty(self.image.as_deref()),
            category_id,
            sizes: self.sizes.clone(),
            colors: self.colors.clone(),
            in_stock: self.in_stock,
            featured: self.featured,
        }
    }
}

impl SeedUser {
    fn registration(&self) -> Registration {
        Registration {
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Load, validate and apply a seed file.
///
/// # Errors
///
/// Returns an error if the file is unreadable or invalid, the database URL is
/// unset, or any write fails.
pub async fn run(file: Option<&Path>, reset: bool) -> Result<SeedSummary, SeedError> {
    let path = file.unwrap_or_else(|| Path::new(DEFAULT_SEED_FILE));
    let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let seed = SeedFile::from_yaml(&text)?;
    seed.validate()?;

    let url = database_url().ok_or(SeedError::MissingEnvVar(DATABASE_URL_VAR))?;
    tracing::info!("Connecting to storefront database...");
    let pool = db::create_pool(&url).await?;

    if reset {
        tracing::warn!("Removing existing catalog, cart and order data");
        reset_catalog(&pool).await?;
    }

    let summary = apply(&pool, &seed).await?;
    tracing::info!(
        categories = summary.categories,
        products = summary.products,
        users = summary.users,
        "Database seeded from {}",
        path.display()
    );
    Ok(summary)
}

async fn reset_catalog(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "TRUNCATE shop.order_line, shop.order, shop.cart_item, shop.product, shop.category \
         RESTART IDENTITY",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn apply(pool: &PgPool, seed: &SeedFile) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();

    let categories = CategoryRepository::new(pool);
    let mut category_ids = Vec::with_capacity(seed.categories.len());
    for category in &seed.categories {
        let saved = categories.upsert_by_name(&category.to_new()).await?;
        tracing::debug!(category_id = %saved.id, name = %category.name, "Seeded category");
        category_ids.push((category.name.trim(), saved.id));
        summary.categories += 1;
    }

    let products = ProductRepository::new(pool);
    for product in &seed.products {
        let category = product.category.trim();
        let category_id = category_ids
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, id)| *id)
            .ok_or_else(|| SeedError::Invalid(format!("unknown category {category:?}")))?;

        let new = product.to_new(category_id);
        match products.find_id_by_name(category_id, &new.name.en).await? {
            Some(id) => {
                products.update(id, &new).await?;
            }
            None => {
                products.create(&new).await?;
            }
        }
        summary.products += 1;
    }

    let auth = AuthService::new(pool);
    for user in &seed.users {
        seed_user(&auth, user).await?;
        summary.users += 1;
    }

    Ok(summary)
}

async fn seed_user(auth: &AuthService<'_>, user: &SeedUser) -> Result<(), SeedError> {
    let account_error = |source| SeedError::Account {
        email: user.email.clone(),
        source,
    };

    match auth.register(&user.registration(), user.role).await {
        Ok(created) => {
            tracing::info!(user_id = %created.id, role = %user.role, "Created {}", user.email);
        }
        Err(AuthError::UserAlreadyExists) => {
            auth.set_password(&user.email, &user.password)
                .await
                .map_err(account_error)?;
            auth.set_role(&user.email, user.role)
                .await
                .map_err(account_error)?;
            tracing::info!(role = %user.role, "Updated {}", user.email);
        }
        Err(e) => return Err(account_error(e)),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
categories:
  - name: Hijab
    nameAr: حجاب
products:
  - name: Silk Hijab
    nameAr: حجاب حريري
    price: '89'
    category: Hijab
users:
  - email: admin@example.com
    password: admin12345
    firstName: Admin
    role: ADMIN
";

    #[test]
    fn test_bundled_seed_file_is_valid() {
        let text = std::fs::read_to_string(DEFAULT_SEED_FILE).unwrap();
        let seed = SeedFile::from_yaml(&text).unwrap();
        seed.validate().unwrap();
        assert_eq!(seed.categories.len(), 5);
        assert_eq!(seed.products.len(), 6);
        assert!(seed.users.iter().any(|u| u.role == UserRole::Admin));
    }

    #[test]
    fn test_defaults() {
        let seed = SeedFile::from_yaml(SAMPLE).unwrap();
        seed.validate().unwrap();

        let product = &seed.products[0];
        assert!(product.in_stock);
        assert!(!product.featured);
        assert!(product.sizes.is_empty());
        assert_eq!(product.price, Decimal::from(89));

        let new = product.to_new(CategoryId::new(4));
        assert_eq!(new.category_id, CategoryId::new(4));
        assert_eq!(new.description.en, None);
    }

    #[test]
    fn test_role_defaults_to_customer() {
        let seed = SeedFile::from_yaml(
            "users:\n  - email: a@example.com\n    password: password1\n    firstName: A\n",
        )
        .unwrap();
        assert_eq!(seed.users[0].role, UserRole::Customer);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let seed = SeedFile::from_yaml(&SAMPLE.replace("category: Hijab", "category: Shoes"))
            .unwrap();
        let err = seed.validate().unwrap_err();
        assert!(err.to_string().contains("unknown category \"Shoes\""));
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let seed = SeedFile::from_yaml(&SAMPLE.replace("'89'", "'0'")).unwrap();
        assert!(matches!(seed.validate(), Err(SeedError::Invalid(_))));
    }

    #[test]
    fn test_price_above_column_range_is_rejected() {
        let seed = SeedFile::from_yaml(&SAMPLE.replace("'89'", "'250000000'")).unwrap();
        let err = seed.validate().unwrap_err();
        assert!(err.to_string().contains("price must be below 100000000"));
    }

    #[test]
    fn test_short_password_is_rejected() {
        let seed = SeedFile::from_yaml(&SAMPLE.replace("admin12345", "short")).unwrap();
        let err = seed.validate().unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn test_duplicate_users_are_rejected() {
        let yaml = "users:
  - email: a@example.com
    password: password1
    firstName: A
  - email: A@example.com
    password: password2
    firstName: B
";
        let seed = SeedFile::from_yaml(yaml).unwrap();
        assert!(matches!(seed.validate(), Err(SeedError::Invalid(_))));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = SeedFile::from_yaml("categories:\n  - name: A\n    nameAr: B\n    colour: red\n");
        assert!(matches!(result, Err(SeedError::Parse(_))));
    }

    #[test]
    fn test_blank_optional_text_is_dropped() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(Some(" Silk ")), Some("Silk".to_owned()));
        assert_eq!(non_empty(None), None);
    }
}
