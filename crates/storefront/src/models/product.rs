//! Product domain types and admin input validation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use elegant_core::{CategoryId, Locale, Localized, Price, ProductId};

/// A catalog product joined with its category name.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: Localized<String>,
    pub description: Localized<Option<String>>,
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: CategoryId,
    /// English name of the category; the catalog filters on it.
    pub category_name: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price formatted for the given locale.
    #[must_use]
    pub fn display_price(&self, locale: Locale) -> String {
        Price::sar(self.price).display(locale)
    }

    /// Whether `size` is one of the offered sizes. Products without a size
    /// list accept any size.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|s| s == size)
    }

    /// Whether `color` is one of the offered colors. Products without a
    /// color list accept any color.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.is_empty() || self.colors.iter().any(|c| c == color)
    }
}

/// JSON shape of a product in the catalog and admin API.
///
/// Field names match what existing clients read, including the snake-case
/// `name_ar` next to camel-case `descriptionAr`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub name_ar: String,
    pub description: Option<String>,
    #[serde(rename = "descriptionAr")]
    pub description_ar: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: Option<String>,
    pub category: String,
    #[serde(rename = "categoryId")]
    pub category_id: CategoryId,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
    pub featured: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name.en,
            name_ar: product.name.ar,
            description: product.description.en,
            description_ar: product.description.ar,
            price: product.price,
            image: product.image,
            category: product.category_name,
            category_id: product.category_id,
            sizes: product.sizes,
            colors: product.colors,
            in_stock: product.in_stock,
            featured: product.featured,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Smallest price `NUMERIC(10, 2)` cannot store.
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Validation failures for [`ProductInput`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductInputError {
    #[error("Missing required fields")]
    MissingRequiredFields,
    #[error("Invalid price")]
    InvalidPrice,
    #[error("Invalid category")]
    InvalidCategory,
}

/// Admin create/update request body, before validation.
///
/// `price` and `categoryId` arrive as JSON numbers or numeric strings
/// depending on the form that posted them, so they are kept as raw values
/// until [`ProductInput::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub name_ar: Option<String>,
    pub description: Option<String>,
    pub description_ar: Option<String>,
    pub price: Option<Value>,
    pub image: Option<String>,
    pub category_id: Option<Value>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}

/// A validated product ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: Localized<String>,
    pub description: Localized<Option<String>>,
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: CategoryId,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
}

impl ProductInput {
    /// Validate the request body.
    ///
    /// Name, Arabic name, a non-zero price and a category are required.
    /// `inStock` defaults to true, `featured` to false, and the option lists
    /// to empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProductInputError::MissingRequiredFields`] when a required
    /// field is absent or empty, and the other variants when a present value
    /// cannot be used.
    pub fn validate(self) -> Result<NewProduct, ProductInputError> {
        let name = non_empty(self.name).ok_or(ProductInputError::MissingRequiredFields)?;
        let name_ar = non_empty(self.name_ar).ok_or(ProductInputError::MissingRequiredFields)?;
        let price = parse_price(self.price.as_ref())?;
        let category_id = parse_category_id(self.category_id.as_ref())?;

        Ok(NewProduct {
            name: Localized::new(name, name_ar),
            description: Localized::new(non_empty(self.description), non_empty(self.description_ar)),
            price,
            image: non_empty(self.image),
            category_id,
            sizes: clean_options(self.sizes),
            colors: clean_options(self.colors),
            in_stock: self.in_stock.unwrap_or(true),
            featured: self.featured.unwrap_or(false),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

fn clean_options(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .collect()
}

fn parse_price(value: Option<&Value>) -> Result<Decimal, ProductInputError> {
    let price = match value {
        None | Some(Value::Null) => return Err(ProductInputError::MissingRequiredFields),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(ProductInputError::MissingRequiredFields);
        }
        Some(Value::String(s)) => {
            Decimal::from_str(s.trim()).map_err(|_| ProductInputError::InvalidPrice)?
        }
        Some(Value::Number(n)) => {
            Decimal::from_str(&n.to_string()).map_err(|_| ProductInputError::InvalidPrice)?
        }
        Some(_) => return Err(ProductInputError::InvalidPrice),
    };

    if price.is_zero() {
        return Err(ProductInputError::MissingRequiredFields);
    }
    let price = price.round_dp(2);
    if price.is_sign_negative() || price >= PRICE_LIMIT {
        return Err(ProductInputError::InvalidPrice);
    }
    Ok(price)
}

fn parse_category_id(value: Option<&Value>) -> Result<CategoryId, ProductInputError> {
    let id = match value {
        None | Some(Value::Null) => return Err(ProductInputError::MissingRequiredFields),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(ProductInputError::MissingRequiredFields);
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| ProductInputError::InvalidCategory)?,
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(ProductInputError::InvalidCategory)?,
        Some(_) => return Err(ProductInputError::InvalidCategory),
    };

    match id {
        0 => Err(ProductInputError::MissingRequiredFields),
        id if id < 0 => Err(ProductInputError::InvalidCategory),
        id => Ok(CategoryId::new(id)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn input(body: Value) -> ProductInput {
        serde_json::from_value(body).unwrap()
    }

    fn complete() -> Value {
        json!({
            "name": "Silk Hijab",
            "nameAr": "حجاب حريري",
            "price": 89.5,
            "categoryId": 1,
        })
    }

    #[test]
    fn test_valid_input_applies_defaults() {
        let product = input(complete()).validate().unwrap();
        assert_eq!(product.name.en, "Silk Hijab");
        assert_eq!(product.name.ar, "حجاب حريري");
        assert_eq!(product.price, Decimal::new(895, 1));
        assert_eq!(product.category_id, CategoryId::new(1));
        assert!(product.in_stock);
        assert!(!product.featured);
        assert!(product.sizes.is_empty());
        assert!(product.colors.is_empty());
    }

    #[test]
    fn test_each_required_field_is_enforced() {
        for field in ["name", "nameAr", "price", "categoryId"] {
            let mut body = complete();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(
                input(body).validate(),
                Err(ProductInputError::MissingRequiredFields),
                "missing {field}"
            );
        }
    }

    #[test]
    fn test_empty_and_zero_values_count_as_missing() {
        let mut body = complete();
        body["name"] = json!("   ");
        assert_eq!(
            input(body).validate(),
            Err(ProductInputError::MissingRequiredFields)
        );

        let mut body = complete();
        body["price"] = json!(0);
        assert_eq!(
            input(body).validate(),
            Err(ProductInputError::MissingRequiredFields)
        );

        let mut body = complete();
        body["categoryId"] = json!("");
        assert_eq!(
            input(body).validate(),
            Err(ProductInputError::MissingRequiredFields)
        );
    }

    #[test]
    fn test_price_accepts_numeric_string() {
        let mut body = complete();
        body["price"] = json!("299.00");
        assert_eq!(
            input(body).validate().unwrap().price,
            Decimal::new(299, 0)
        );
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        let mut body = complete();
        body["price"] = json!("cheap");
        assert_eq!(input(body).validate(), Err(ProductInputError::InvalidPrice));

        let mut body = complete();
        body["price"] = json!(-10);
        assert_eq!(input(body).validate(), Err(ProductInputError::InvalidPrice));
    }

    #[test]
    fn test_price_must_fit_the_price_column() {
        let mut body = complete();
        body["price"] = json!("99999999.99");
        assert_eq!(
            input(body).validate().unwrap().price,
            Decimal::new(9_999_999_999, 2)
        );

        for too_large in [json!("123456789012.5"), json!(100_000_000), json!("99999999.999")] {
            let mut body = complete();
            body["price"] = too_large.clone();
            assert_eq!(
                input(body).validate(),
                Err(ProductInputError::InvalidPrice),
                "{too_large}"
            );
        }
    }

    #[test]
    fn test_category_id_accepts_numeric_string() {
        let mut body = complete();
        body["categoryId"] = json!("3");
        assert_eq!(
            input(body).validate().unwrap().category_id,
            CategoryId::new(3)
        );

        let mut body = complete();
        body["categoryId"] = json!("abayas");
        assert_eq!(
            input(body).validate(),
            Err(ProductInputError::InvalidCategory)
        );
    }

    #[test]
    fn test_options_are_trimmed() {
        let mut body = complete();
        body["sizes"] = json!([" S ", "", "M"]);
        body["colors"] = json!(["Black"]);
        body["featured"] = json!(true);
        body["inStock"] = json!(false);
        let product = input(body).validate().unwrap();
        assert_eq!(product.sizes, vec!["S", "M"]);
        assert_eq!(product.colors, vec!["Black"]);
        assert!(product.featured);
        assert!(!product.in_stock);
    }

    #[test]
    fn test_response_keeps_wire_field_names() {
        let product = Product {
            id: ProductId::new(7),
            name: Localized::new("Classic Abaya".to_owned(), "عباية كلاسيكية".to_owned()),
            description: Localized::new(None, None),
            price: Decimal::new(29900, 2),
            image: None,
            category_id: CategoryId::new(3),
            category_name: "Abaya".to_owned(),
            sizes: vec!["M".to_owned()],
            colors: vec![],
            in_stock: true,
            featured: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(ProductResponse::from(product)).unwrap();
        assert_eq!(value["name_ar"], "عباية كلاسيكية");
        assert_eq!(value["category"], "Abaya");
        assert_eq!(value["categoryId"], 3);
        assert_eq!(value["price"], json!(299.0));
        assert_eq!(value["inStock"], true);
    }

    #[test]
    fn test_offers_size_and_color() {
        let mut product = Product {
            id: ProductId::new(1),
            name: Localized::default(),
            description: Localized::default(),
            price: Decimal::ONE,
            image: None,
            category_id: CategoryId::new(1),
            category_name: String::new(),
            sizes: vec![],
            colors: vec!["Black".to_owned()],
            in_stock: true,
            featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(product.offers_size("XL"));
        assert!(product.offers_color("Black"));
        assert!(!product.offers_color("Red"));
        product.sizes = vec!["S".to_owned()];
        assert!(!product.offers_size("XL"));
    }
}
