use chrono::Utc;

use crate::domain::product::{Product, ProductWithRelations};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::{ProductReader, ProductTagWriter, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every product with its category and tags.
pub fn load_products<R>(repo: &R) -> ServiceResult<Vec<ProductWithRelations>>
where
    R: ProductReader + ?Sized,
{
    repo.list_products().map_err(ServiceError::from)
}

/// Fetches one product with its category and tags.
pub fn load_product<R>(repo: &R, product_id: i32) -> ServiceResult<ProductWithRelations>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a product and attaches the requested tags.
///
/// When attaching the tags fails the freshly created product is removed again.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ProductTagWriter + ?Sized,
{
    let payload = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_product(&payload.product).map_err(ServiceError::from)?;

    if payload.tag_ids.is_empty() {
        return Ok(created);
    }

    if let Err(err) = repo.sync_product_tags(created.id, &payload.tag_ids) {
        log::error!("Failed to attach tags to product {}: {err}", created.id);
        if let Err(delete_err) = repo.delete_product(created.id) {
            log::error!(
                "Failed to roll back product {} after tag error: {delete_err}",
                created.id
            );
        }
        return Err(ServiceError::from(err));
    }

    Ok(created)
}

/// Applies a partial update and, when a non-empty `tagIds` list is supplied,
/// reconciles the product's tags with it in the same transaction.
///
/// An empty or missing tag list leaves the existing tags in place.
pub fn modify_product<R>(
    repo: &R,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<ProductWithRelations>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let payload = form
        .into_update_product(Utc::now().naive_utc())
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    match payload.tag_ids.filter(|ids| !ids.is_empty()) {
        Some(tag_ids) => {
            let (_, plan) = repo
                .update_product_with_tags(product_id, &payload.update, &tag_ids)
                .map_err(ServiceError::from)?;
            log::info!(
                "Reconciled tags of product {product_id}: {} added, {} removed",
                plan.to_insert.len(),
                plan.to_delete.len()
            );
        }
        None => {
            repo.update_product(product_id, &payload.update).map_err(ServiceError::from)?;
        }
    }

    load_product(repo, product_id)
}

/// Deletes a product together with its tag associations.
pub fn remove_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id).map_err(ServiceError::from)
}
