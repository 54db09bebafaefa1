use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{NAME_MAX_LEN, sanitize_inline_text};

/// Upper bound for a price in major currency units; keeps cents within `i32`.
const PRICE_MAX: f64 = 10_000_000.0;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The price could not be represented in cents.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: f64 },
    /// A referenced identifier is not a positive integer.
    #[error("invalid {field} `{value}`")]
    InvalidIdentifier { field: &'static str, value: i32 },
}

/// Body accepted by `POST /api/products`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Price in major currency units (for example `14.99`).
    #[validate(range(min = 0.0, max = PRICE_MAX))]
    pub price: f64,
    /// Units in stock.
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
    /// Optional category the product belongs to.
    #[serde(default)]
    pub category_id: Option<i32>,
    /// Tags to attach to the new product.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Option<Vec<i32>>,
}

/// Normalized payload produced by [`AddProductForm`].
#[derive(Debug)]
pub struct NewProductPayload {
    pub product: NewProduct,
    pub tag_ids: Vec<i32>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct` plus its tag ids.
    pub fn into_new_product(self) -> ProductFormResult<NewProductPayload> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let price_cents = price_to_cents(self.price)?;
        let mut product = NewProduct::new(sanitized_name, price_cents).with_stock(self.stock);

        if let Some(category_id) = self.category_id {
            product = product.with_category_id(positive_id("category_id", category_id)?);
        }

        Ok(NewProductPayload {
            product,
            tag_ids: self.tag_ids.unwrap_or_default(),
        })
    }
}

/// Body accepted by `PUT /api/products/{id}`. Every field is optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = PRICE_MAX))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    /// Absent leaves the category alone, `null` detaches it.
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<i32>>,
    /// Desired tag set; absent or empty leaves the current tags untouched.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Option<Vec<i32>>,
}

/// Normalized payload produced by [`EditProductForm`].
#[derive(Debug)]
pub struct EditProductPayload {
    pub update: UpdateProduct,
    pub tag_ids: Option<Vec<i32>>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct` plus the desired tags.
    pub fn into_update_product(
        self,
        updated_at: NaiveDateTime,
    ) -> ProductFormResult<EditProductPayload> {
        self.validate()?;

        let EditProductForm {
            name,
            price,
            stock,
            category_id,
            tag_ids,
        } = self;

        let mut update = UpdateProduct::new();
        update.updated_at = updated_at;

        if let Some(name) = name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(ProductFormError::EmptyName);
            }
            update = update.name(sanitized);
        }

        if let Some(price) = price {
            update = update.price_cents(price_to_cents(price)?);
        }

        if let Some(stock) = stock {
            update = update.stock(stock);
        }

        if let Some(category_id) = category_id {
            let category_id = category_id
                .map(|id| positive_id("category_id", id))
                .transpose()?;
            update = update.category_id(category_id);
        }

        Ok(EditProductPayload { update, tag_ids })
    }
}

fn price_to_cents(price: f64) -> ProductFormResult<i32> {
    if !price.is_finite() || !(0.0..=PRICE_MAX).contains(&price) {
        return Err(ProductFormError::InvalidPrice { value: price });
    }

    Ok((price * 100.0).round() as i32)
}

fn positive_id(field: &'static str, value: i32) -> ProductFormResult<i32> {
    if value < 1 {
        return Err(ProductFormError::InvalidIdentifier { field, value });
    }
    Ok(value)
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}
