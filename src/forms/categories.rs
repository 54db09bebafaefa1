use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{NAME_MAX_LEN, sanitize_inline_text};

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category payloads.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
}

/// Body accepted when creating or renaming a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
}

impl CategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        let name = self.sanitized_name()?;
        Ok(NewCategory::new(name))
    }

    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(
        self,
        updated_at: NaiveDateTime,
    ) -> CategoryFormResult<UpdateCategory> {
        let name = self.sanitized_name()?;
        Ok(UpdateCategory { name, updated_at })
    }

    fn sanitized_name(&self) -> CategoryFormResult<String> {
        self.validate()?;

        let sanitized = sanitize_inline_text(&self.name);
        if sanitized.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        Ok(sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn category_form_sanitizes_name() {
        let form = CategoryForm {
            name: "  Outdoor \t Gear ".to_string(),
        };

        let new_category = form.into_new_category().expect("valid form");

        assert_eq!(new_category.name, "Outdoor Gear");
    }

    #[test]
    fn category_form_rejects_blank_name() {
        let form = CategoryForm {
            name: "   ".to_string(),
        };

        let result = form.into_new_category();

        assert!(matches!(result, Err(CategoryFormError::EmptyName)));
    }

    #[test]
    fn category_form_rejects_overlong_name() {
        let form = CategoryForm {
            name: "x".repeat(NAME_MAX_LEN as usize + 1),
        };

        let result = form.into_new_category();

        assert!(matches!(result, Err(CategoryFormError::Validation(_))));
    }

    #[test]
    fn category_form_builds_update() {
        let updated_at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        let form = CategoryForm {
            name: "Shoes".to_string(),
        };

        let update = form.into_update_category(updated_at).expect("valid form");

        assert_eq!(update.name, "Shoes");
        assert_eq!(update.updated_at, updated_at);
    }
}
