//! Category domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use elegant_core::{CategoryId, Localized};

/// A bilingual product category.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: Localized<String>,
    pub description: Localized<Option<String>>,
    pub image: Option<String>,
    /// Number of products in the category.
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// URL segment for the category page.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name.en.to_lowercase()
    }
}

/// JSON shape of a category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub name_ar: String,
    pub description: Option<String>,
    pub description_ar: Option<String>,
    pub image: Option<String>,
    pub product_count: i64,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name.en,
            name_ar: category.name.ar,
            description: category.description.en,
            description_ar: category.description.ar,
            image: category.image,
            product_count: category.product_count,
        }
    }
}

/// Admin create/update request body for a category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: Option<String>,
    pub name_ar: Option<String>,
    pub description: Option<String>,
    pub description_ar: Option<String>,
    pub image: Option<String>,
}

/// A validated category ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: Localized<String>,
    pub description: Localized<Option<String>>,
    pub image: Option<String>,
}

/// The category request lacked a name in one of the languages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required fields")]
pub struct MissingCategoryFields;

impl CategoryInput {
    /// Validate the request body. Both names are required.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCategoryFields`] when either name is absent or blank.
    pub fn validate(self) -> Result<NewCategory, MissingCategoryFields> {
        let name = trimmed(self.name).ok_or(MissingCategoryFields)?;
        let name_ar = trimmed(self.name_ar).ok_or(MissingCategoryFields)?;
        Ok(NewCategory {
            name: Localized::new(name, name_ar),
            description: Localized::new(trimmed(self.description), trimmed(self.description_ar)),
            image: trimmed(self.image),
        })
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_requires_both_names() {
        let input = CategoryInput {
            name: Some("Hijab".to_owned()),
            ..CategoryInput::default()
        };
        assert_eq!(input.validate(), Err(MissingCategoryFields));

        let input = CategoryInput {
            name: Some(" Hijab ".to_owned()),
            name_ar: Some("حجاب".to_owned()),
            description: Some(String::new()),
            ..CategoryInput::default()
        };
        let category = input.validate().unwrap();
        assert_eq!(category.name.en, "Hijab");
        assert_eq!(category.description.en, None);
    }
}
